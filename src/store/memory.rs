//! In-process [`HrStore`] adapter.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, CashAdvance, ChurnPrediction, Employee, EmploymentContract, PayrollEntry,
    PayrollPeriod,
};

use super::HrStore;

type AttendanceKey = (String, u32, i32);

/// An [`HrStore`] held in memory behind read-write locks.
///
/// Writes that reference an unknown employee are rejected as a whole, the
/// way a foreign key would reject them.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<Vec<Employee>>,
    contracts: RwLock<Vec<EmploymentContract>>,
    attendance: RwLock<HashMap<AttendanceKey, AttendanceSummary>>,
    payroll: RwLock<Vec<PayrollEntry>>,
    predictions: RwLock<Vec<ChurnPrediction>>,
    advances: RwLock<Vec<CashAdvance>>,
}

fn read<'a, T>(lock: &'a RwLock<T>, operation: &str) -> EngineResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| EngineError::StoreError {
        operation: operation.to_string(),
        message: "lock poisoned".to_string(),
    })
}

fn write<'a, T>(lock: &'a RwLock<T>, operation: &str) -> EngineResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| EngineError::StoreError {
        operation: operation.to_string(),
        message: "lock poisoned".to_string(),
    })
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with employees and contracts.
    pub fn with_records(employees: Vec<Employee>, contracts: Vec<EmploymentContract>) -> Self {
        Self {
            employees: RwLock::new(employees),
            contracts: RwLock::new(contracts),
            ..Self::default()
        }
    }

    fn ensure_employees<'a>(
        &self,
        operation: &str,
        mut ids: impl Iterator<Item = &'a str>,
    ) -> EngineResult<()> {
        let employees = read(&self.employees, operation)?;
        match ids.find(|id| !employees.iter().any(|e| e.id == *id)) {
            Some(unknown) => Err(EngineError::StoreError {
                operation: operation.to_string(),
                message: format!("unknown employee '{}'", unknown),
            }),
            None => Ok(()),
        }
    }
}

impl HrStore for InMemoryStore {
    fn employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(read(&self.employees, "employees")?.clone())
    }

    fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        read(&self.employees, "employee")?
            .iter()
            .find(|e| e.id == employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        employee.validate()?;
        let mut employees = write(&self.employees, "upsert_employee")?;
        match employees.iter().position(|e| e.id == employee.id) {
            Some(index) => employees[index] = employee,
            None => employees.push(employee),
        }
        Ok(())
    }

    fn contracts(&self) -> EngineResult<Vec<EmploymentContract>> {
        Ok(read(&self.contracts, "contracts")?.clone())
    }

    fn insert_contract(&self, contract: EmploymentContract) -> EngineResult<()> {
        self.ensure_employees("insert_contract", std::iter::once(contract.employee_id.as_str()))?;
        let mut contracts = write(&self.contracts, "insert_contract")?;
        for existing in contracts
            .iter_mut()
            .filter(|c| c.employee_id == contract.employee_id)
        {
            existing.is_active = false;
        }
        contracts.push(contract);
        Ok(())
    }

    fn attendance(&self, period: PayrollPeriod) -> EngineResult<Vec<AttendanceSummary>> {
        let mut summaries: Vec<AttendanceSummary> = read(&self.attendance, "attendance")?
            .values()
            .filter(|s| s.is_for(period))
            .cloned()
            .collect();
        summaries.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(summaries)
    }

    fn upsert_attendance(&self, summaries: &[AttendanceSummary]) -> EngineResult<usize> {
        self.ensure_employees(
            "upsert_attendance",
            summaries.iter().map(|s| s.employee_id.as_str()),
        )?;
        let mut attendance = write(&self.attendance, "upsert_attendance")?;
        for summary in summaries {
            attendance.insert(summary.key(), summary.clone());
        }
        Ok(summaries.len())
    }

    fn insert_payroll_entries(
        &self,
        entries: &[PayrollEntry],
        collected: &[CashAdvance],
    ) -> EngineResult<()> {
        let operation = "insert_payroll_entries";
        self.ensure_employees(operation, entries.iter().map(|e| e.employee_id.as_str()))?;

        let mut payroll = write(&self.payroll, operation)?;
        let mut advances = write(&self.advances, operation)?;
        let mut positions = Vec::with_capacity(collected.len());
        for advance in collected {
            match advances.iter().position(|a| a.id == advance.id) {
                Some(index) => positions.push(index),
                None => {
                    return Err(EngineError::StoreError {
                        operation: operation.to_string(),
                        message: format!("unknown cash advance '{}'", advance.id),
                    });
                }
            }
        }

        for (index, advance) in positions.into_iter().zip(collected) {
            advances[index] = advance.clone();
        }
        payroll.extend_from_slice(entries);
        Ok(())
    }

    fn payroll_entries(&self, period: PayrollPeriod) -> EngineResult<Vec<PayrollEntry>> {
        Ok(read(&self.payroll, "payroll_entries")?
            .iter()
            .filter(|e| e.period_month == period.month && e.period_year == period.year)
            .cloned()
            .collect())
    }

    fn insert_predictions(&self, predictions: &[ChurnPrediction]) -> EngineResult<()> {
        self.ensure_employees(
            "insert_predictions",
            predictions.iter().map(|p| p.employee_id.as_str()),
        )?;
        write(&self.predictions, "insert_predictions")?.extend_from_slice(predictions);
        Ok(())
    }

    fn predictions(&self) -> EngineResult<Vec<ChurnPrediction>> {
        Ok(read(&self.predictions, "predictions")?.clone())
    }

    fn cash_advances(&self) -> EngineResult<Vec<CashAdvance>> {
        let mut advances = read(&self.advances, "cash_advances")?.clone();
        advances.sort_by(|a, b| b.request_date.cmp(&a.request_date));
        Ok(advances)
    }

    fn cash_advance(&self, id: Uuid) -> EngineResult<CashAdvance> {
        read(&self.advances, "cash_advance")?
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(EngineError::CashAdvanceNotFound { id })
    }

    fn save_cash_advance(&self, advance: CashAdvance) -> EngineResult<()> {
        self.ensure_employees(
            "save_cash_advance",
            std::iter::once(advance.employee_id.as_str()),
        )?;
        let mut advances = write(&self.advances, "save_cash_advance")?;
        match advances.iter().position(|a| a.id == advance.id) {
            Some(index) => advances[index] = advance,
            None => advances.push(advance),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceCounts, CashAdvanceStatus, PayrollStatus, Role};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            full_name: format!("Employee {}", id),
            role: Role::Crew,
            is_active: true,
            join_date: None,
            resign_date: None,
            outlet: None,
            distance_km: None,
            bank_name: None,
            bank_account_number: None,
        }
    }

    fn summary(employee_id: &str, h: u32) -> AttendanceSummary {
        AttendanceSummary {
            employee_id: employee_id.to_string(),
            month: 1,
            year: 2026,
            counts: AttendanceCounts {
                h,
                ..Default::default()
            },
            has_sick_letter: false,
        }
    }

    fn entry(employee_id: &str) -> PayrollEntry {
        PayrollEntry {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            period_month: 1,
            period_year: 2026,
            basic_salary: Decimal::ZERO,
            allowances: Decimal::ZERO,
            deductions: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            total_salary: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            work_days: 26,
            notes: String::new(),
            status: PayrollStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn create_store() -> InMemoryStore {
        InMemoryStore::with_records(vec![employee("e1"), employee("e2")], Vec::new())
    }

    #[test]
    fn test_upsert_employee_replaces_by_id() {
        let store = create_store();
        let mut renamed = employee("e1");
        renamed.full_name = "Budi Santoso".to_string();

        store.upsert_employee(renamed).unwrap();

        assert_eq!(store.employees().unwrap().len(), 2);
        assert_eq!(store.employee("e1").unwrap().full_name, "Budi Santoso");
    }

    #[test]
    fn test_upsert_employee_validates() {
        let store = create_store();
        let mut bad = employee("e3");
        bad.distance_km = Some(-1.0);
        assert!(matches!(
            store.upsert_employee(bad),
            Err(EngineError::InvalidEmployee { .. })
        ));
    }

    #[test]
    fn test_missing_employee() {
        assert!(matches!(
            create_store().employee("nobody"),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_attendance_upsert_is_last_write_wins() {
        let store = create_store();
        store.upsert_attendance(&[summary("e1", 10)]).unwrap();
        store.upsert_attendance(&[summary("e1", 20), summary("e2", 5)]).unwrap();

        let saved = store.attendance(PayrollPeriod::new(1, 2026).unwrap()).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].counts.h, 20);
        assert!(store.attendance(PayrollPeriod::new(2, 2026).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_attendance_batch_with_unknown_employee_writes_nothing() {
        let store = create_store();

        let result = store.upsert_attendance(&[summary("e1", 10), summary("ghost", 3)]);

        match result {
            Err(EngineError::StoreError { operation, message }) => {
                assert_eq!(operation, "upsert_attendance");
                assert!(message.contains("ghost"));
            }
            other => panic!("Expected StoreError, got {:?}", other),
        }
        assert!(store.attendance(PayrollPeriod::new(1, 2026).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_payroll_entries_are_appended() {
        let store = create_store();
        store.insert_payroll_entries(&[entry("e1")], &[]).unwrap();
        store.insert_payroll_entries(&[entry("e1")], &[]).unwrap();

        let entries = store.payroll_entries(PayrollPeriod::new(1, 2026).unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    fn advance(employee_id: &str, remaining: i64) -> CashAdvance {
        CashAdvance {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            amount: Decimal::new(200_000, 0),
            reason: "Rent".to_string(),
            deduction_plan_amount: Decimal::new(200_000, 0),
            request_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
            status: CashAdvanceStatus::Approved,
            approved_amount: Decimal::new(200_000, 0),
            remaining_amount: Decimal::new(remaining, 0),
            agreement_statement: true,
        }
    }

    #[test]
    fn test_payroll_entries_save_collected_advances() {
        let store = create_store();
        let outstanding = advance("e1", 200_000);
        store.save_cash_advance(outstanding.clone()).unwrap();
        let collected = CashAdvance {
            remaining_amount: Decimal::ZERO,
            status: CashAdvanceStatus::PaidOff,
            ..outstanding.clone()
        };

        store.insert_payroll_entries(&[entry("e1")], &[collected]).unwrap();

        let saved = store.cash_advance(outstanding.id).unwrap();
        assert_eq!(saved.status, CashAdvanceStatus::PaidOff);
        assert_eq!(store.cash_advances().unwrap().len(), 1);
    }

    #[test]
    fn test_payroll_batch_with_unknown_advance_writes_nothing() {
        let store = create_store();
        let known = advance("e1", 200_000);
        store.save_cash_advance(known.clone()).unwrap();
        let paid = CashAdvance {
            remaining_amount: Decimal::ZERO,
            ..known.clone()
        };

        let result = store.insert_payroll_entries(&[entry("e1")], &[paid, advance("e2", 0)]);

        assert!(matches!(result, Err(EngineError::StoreError { .. })));
        assert!(store.payroll_entries(PayrollPeriod::new(1, 2026).unwrap()).unwrap().is_empty());
        assert_eq!(
            store.cash_advance(known.id).unwrap().remaining_amount,
            Decimal::new(200_000, 0)
        );
    }

    #[test]
    fn test_new_contract_deactivates_previous() {
        let store = create_store();
        let contract = |base: i64| EmploymentContract {
            employee_id: "e1".to_string(),
            contract_number: None,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: None,
            contract_type: "PKWTTP".to_string(),
            experience_level: None,
            outlet_type: None,
            base_salary: Decimal::new(base, 0),
            salary_schedule: Vec::new(),
            daily_meal_allowance: Decimal::ZERO,
            is_active: true,
            created_at: None,
        };

        store.insert_contract(contract(1)).unwrap();
        store.insert_contract(contract(2)).unwrap();

        let contracts = store.contracts().unwrap();
        assert!(!contracts[0].is_active);
        assert!(contracts[1].is_active);
    }

    #[test]
    fn test_missing_cash_advance() {
        let id = Uuid::new_v4();
        match create_store().cash_advance(id) {
            Err(EngineError::CashAdvanceNotFound { id: missing }) => assert_eq!(missing, id),
            other => panic!("Expected CashAdvanceNotFound, got {:?}", other),
        }
    }
}
