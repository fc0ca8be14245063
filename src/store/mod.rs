//! Persistence port for HR records.
//!
//! The calculators never touch storage. [`HrStore`] is the boundary the
//! service layer reads inputs from and writes results to; every write of a
//! batch is applied completely or not at all.

mod memory;

pub use memory::InMemoryStore;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AttendanceSummary, CashAdvance, ChurnPrediction, Employee, EmploymentContract, PayrollEntry,
    PayrollPeriod,
};

/// Port for reading and writing HR records.
pub trait HrStore: Send + Sync {
    /// All employees, active or not.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// One employee by id.
    fn employee(&self, employee_id: &str) -> EngineResult<Employee>;

    /// Inserts or replaces an employee by id.
    fn upsert_employee(&self, employee: Employee) -> EngineResult<()>;

    /// All contracts.
    fn contracts(&self) -> EngineResult<Vec<EmploymentContract>>;

    /// Stores a new contract, deactivating the employee's earlier ones.
    fn insert_contract(&self, contract: EmploymentContract) -> EngineResult<()>;

    /// Attendance summaries of one period.
    fn attendance(&self, period: PayrollPeriod) -> EngineResult<Vec<AttendanceSummary>>;

    /// Upserts summaries keyed by (employee, month, year); last write wins.
    fn upsert_attendance(&self, summaries: &[AttendanceSummary]) -> EngineResult<usize>;

    /// Appends payroll entries and replaces the cash advances whose
    /// installments they collected, in one batch. Never deduplicates.
    fn insert_payroll_entries(
        &self,
        entries: &[PayrollEntry],
        collected: &[CashAdvance],
    ) -> EngineResult<()>;

    /// Payroll entries of one period, oldest run first.
    fn payroll_entries(&self, period: PayrollPeriod) -> EngineResult<Vec<PayrollEntry>>;

    /// Appends a batch of churn predictions.
    fn insert_predictions(&self, predictions: &[ChurnPrediction]) -> EngineResult<()>;

    /// Every prediction ever stored.
    fn predictions(&self) -> EngineResult<Vec<ChurnPrediction>>;

    /// All cash advances, newest request first.
    fn cash_advances(&self) -> EngineResult<Vec<CashAdvance>>;

    /// One cash advance by id.
    fn cash_advance(&self, id: Uuid) -> EngineResult<CashAdvance>;

    /// Inserts or replaces a cash advance by id.
    fn save_cash_advance(&self, advance: CashAdvance) -> EngineResult<()>;
}
