//! Orchestration of the calculators over an [`HrStore`].
//!
//! Every operation fetches what it needs from the store, runs the pure
//! calculators and, where the operation persists, writes the result back as
//! a single batch. Payroll runs are appended: running the same period twice
//! stores two sets of entries.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    AdvanceRequest, ApprovalDecision, AttendanceSheet, CashAdvanceInstallment, NameMatcher,
    PayrollBoard, PayrollEdit, ProbationApplicant, RiskOverview, TwoTokenPrefixMatcher,
    UnexcusedAbsencePenalty, UploadOutcome, approve_advance, draft_probation_contract,
    parse_roster, predict_batch, record_repayment, reject_advance, submit_advance,
};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    AttendanceCounts, CashAdvance, ChurnPrediction, Employee, EmploymentContract, PayrollEntry,
    PayrollPeriod,
};
use crate::store::HrStore;

/// How a payroll preview or run is assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollOptions {
    /// Replace default work-days with the saved attendance of the period.
    #[serde(default)]
    pub sync_attendance: bool,
    /// Manual edits, applied in order after the sync.
    #[serde(default)]
    pub edits: Vec<PayrollEdit>,
    /// Deduct the monthly installment of active cash advances.
    #[serde(default)]
    pub deduct_cash_advances: bool,
}

/// Hand-entered counters for one row of the attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The employee.
    pub employee_id: String,
    /// Day counters.
    #[serde(flatten)]
    pub counts: AttendanceCounts,
    /// Whether a sick-leave document was provided.
    #[serde(default)]
    pub has_sick_letter: bool,
}

/// The entries stored by one payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Shared by every entry of the run.
    pub run_id: Uuid,
    /// The stored entries.
    pub entries: Vec<PayrollEntry>,
}

/// HR operations over a store.
pub struct HrService {
    store: Arc<dyn HrStore>,
    config: EngineConfig,
    matcher: Arc<dyn NameMatcher>,
}

impl HrService {
    /// Creates a service matching uploads with [`TwoTokenPrefixMatcher`].
    pub fn new(store: Arc<dyn HrStore>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            matcher: Arc::new(TwoTokenPrefixMatcher),
        }
    }

    /// Replaces the upload name matcher.
    pub fn with_matcher(mut self, matcher: Arc<dyn NameMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// The configuration the calculators run with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    // Employees

    /// Every employee in the store.
    pub fn employees(&self) -> EngineResult<Vec<Employee>> {
        self.store.employees()
    }

    /// Adds or replaces an employee.
    pub fn save_employee(&self, employee: Employee) -> EngineResult<Employee> {
        self.store.upsert_employee(employee.clone())?;
        debug!(employee_id = %employee.id, "Saved employee");
        Ok(employee)
    }

    // Attendance

    /// The attendance sheet of a period, pre-filled from saved summaries.
    pub fn attendance_sheet(&self, period: PayrollPeriod) -> EngineResult<AttendanceSheet> {
        let employees = self.store.employees()?;
        let saved = self.store.attendance(period)?;
        Ok(AttendanceSheet::for_period(&employees, &saved, period))
    }

    /// Applies an uploaded roster to the sheet of a period without saving.
    pub fn import_attendance(
        &self,
        period: PayrollPeriod,
        upload: &str,
    ) -> EngineResult<UploadOutcome> {
        let sheet = self.attendance_sheet(period)?;
        let rows = parse_roster(upload);
        let outcome = sheet.apply_upload(&rows, self.matcher.as_ref());

        info!(
            period = %period,
            uploaded_rows = rows.len(),
            matched = outcome.matched,
            ambiguous = outcome.ambiguous,
            "Imported attendance upload"
        );
        Ok(outcome)
    }

    /// Saves the sheet of a period with the given rows replaced.
    ///
    /// Rows not mentioned keep their saved counters. Returns the number of
    /// summaries written.
    pub fn save_attendance(
        &self,
        period: PayrollPeriod,
        entries: &[AttendanceEntry],
    ) -> EngineResult<usize> {
        let mut sheet = self.attendance_sheet(period)?;
        for entry in entries {
            sheet = sheet.with_counts(&entry.employee_id, entry.counts, entry.has_sick_letter)?;
        }

        let written = self.store.upsert_attendance(&sheet.to_summaries())?;
        info!(period = %period, written, "Saved attendance");
        Ok(written)
    }

    // Payroll

    /// Drafts payroll for a period without saving it.
    pub fn preview_payroll(
        &self,
        period: PayrollPeriod,
        options: &PayrollOptions,
    ) -> EngineResult<PayrollBoard> {
        let (board, _) = self.draft_payroll(period, options)?;
        Ok(board)
    }

    /// The drafted board and the cash advances its installments repay.
    fn draft_payroll(
        &self,
        period: PayrollPeriod,
        options: &PayrollOptions,
    ) -> EngineResult<(PayrollBoard, Vec<CashAdvance>)> {
        let employees = self.store.employees()?;
        let contracts = self.store.contracts()?;
        let mut board = PayrollBoard::build(&employees, &contracts, period, &self.config);

        if options.sync_attendance {
            let summaries = self.store.attendance(period)?;
            let (synced_board, synced) = board.sync_attendance(&summaries);
            debug!(period = %period, synced, "Synced attendance into payroll");
            board = synced_board;
        }

        board = board.apply_all(&options.edits)?;

        if let Some(per_day) = self.config.payroll().absence_penalty_per_day {
            board = board.inject_deductions(&UnexcusedAbsencePenalty::new(per_day));
        }

        let mut collected = Vec::new();
        if options.deduct_cash_advances {
            let advances = self.store.cash_advances()?;
            let installments = CashAdvanceInstallment::from_advances(&advances);
            board = board.inject_deductions(&installments);
            collected = installments.collect(&board)?;
        }

        Ok((board, collected))
    }

    /// Drafts payroll for a period and appends the entries to the store.
    ///
    /// Cash-advance installments deducted by the run are repaid in the same
    /// batch, so a later run only charges what is still outstanding.
    pub fn run_payroll(
        &self,
        period: PayrollPeriod,
        options: &PayrollOptions,
    ) -> EngineResult<PayrollRun> {
        let start_time = Instant::now();
        let (board, collected) = self.draft_payroll(period, options)?;

        let run_id = Uuid::new_v4();
        let entries = board.into_entries(run_id, Utc::now());
        if let Err(err) = self.store.insert_payroll_entries(&entries, &collected) {
            warn!(period = %period, run_id = %run_id, error = %err, "Payroll run not saved");
            return Err(err);
        }

        let net_total: Decimal = entries.iter().map(|e| e.net_salary).sum();
        info!(
            period = %period,
            run_id = %run_id,
            entries = entries.len(),
            advances_collected = collected.len(),
            net_total = %net_total,
            duration_us = start_time.elapsed().as_micros(),
            "Payroll run saved"
        );
        Ok(PayrollRun { run_id, entries })
    }

    /// Stored payroll entries of a period, from every run.
    pub fn payroll_entries(&self, period: PayrollPeriod) -> EngineResult<Vec<PayrollEntry>> {
        self.store.payroll_entries(period)
    }

    // Churn

    /// Scores every active employee and appends the batch to the store.
    pub fn run_churn_predictions(&self) -> EngineResult<Vec<ChurnPrediction>> {
        let employees = self.store.employees()?;
        let predictions = predict_batch(&employees, self.config.churn(), Utc::now());
        self.store.insert_predictions(&predictions)?;

        info!(
            predictions = predictions.len(),
            batch_id = ?predictions.first().map(|p| p.batch_id),
            "Churn batch saved"
        );
        Ok(predictions)
    }

    /// Dashboard view of the latest prediction batch.
    pub fn risk_overview(&self) -> EngineResult<RiskOverview> {
        let employees = self.store.employees()?;
        let predictions = self.store.predictions()?;
        Ok(RiskOverview::build(&employees, &predictions, self.config.churn()))
    }

    /// The top-risk list as CSV.
    pub fn export_risks_csv(&self) -> EngineResult<String> {
        Ok(self.risk_overview()?.to_csv())
    }

    // Cash advances

    /// All cash advances, newest request first.
    pub fn cash_advances(&self) -> EngineResult<Vec<CashAdvance>> {
        self.store.cash_advances()
    }

    /// Records a new advance request for an existing employee.
    pub fn submit_cash_advance(&self, request: &AdvanceRequest) -> EngineResult<CashAdvance> {
        self.store.employee(&request.employee_id)?;
        let advance = submit_advance(request, Self::today())?;
        self.store.save_cash_advance(advance.clone())?;

        info!(
            advance_id = %advance.id,
            employee_id = %advance.employee_id,
            amount = %advance.amount,
            "Cash advance requested"
        );
        Ok(advance)
    }

    /// Approves an advance or adjusts its terms.
    pub fn approve_cash_advance(
        &self,
        id: Uuid,
        decision: &ApprovalDecision,
    ) -> EngineResult<CashAdvance> {
        let advance = approve_advance(&self.store.cash_advance(id)?, decision)?;
        self.store.save_cash_advance(advance.clone())?;
        info!(
            advance_id = %id,
            approved_amount = %advance.approved_amount,
            "Cash advance approved"
        );
        Ok(advance)
    }

    /// Rejects a pending advance.
    pub fn reject_cash_advance(&self, id: Uuid) -> EngineResult<CashAdvance> {
        let advance = reject_advance(&self.store.cash_advance(id)?)?;
        self.store.save_cash_advance(advance.clone())?;
        info!(advance_id = %id, "Cash advance rejected");
        Ok(advance)
    }

    /// Records a repayment against an approved advance.
    pub fn repay_cash_advance(&self, id: Uuid, amount: Decimal) -> EngineResult<CashAdvance> {
        let advance = record_repayment(&self.store.cash_advance(id)?, amount)?;
        self.store.save_cash_advance(advance.clone())?;
        info!(
            advance_id = %id,
            remaining_amount = %advance.remaining_amount,
            status = ?advance.status,
            "Cash advance repayment recorded"
        );
        Ok(advance)
    }

    // Contracts

    /// Drafts a probation contract for an existing employee and stores it
    /// as their active contract.
    pub fn draft_contract(
        &self,
        applicant: &ProbationApplicant,
    ) -> EngineResult<EmploymentContract> {
        self.store.employee(&applicant.employee_id)?;
        let contract = EmploymentContract {
            created_at: Some(Utc::now()),
            ..draft_probation_contract(applicant, Self::today(), &self.config)?
        };
        self.store.insert_contract(contract.clone())?;

        info!(
            employee_id = %contract.employee_id,
            contract_number = ?contract.contract_number,
            "Probation contract stored"
        );
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::ExactNameMatcher;
    use crate::error::EngineError;
    use crate::models::{AttendanceSummary, CashAdvanceStatus, ExperienceLevel, Outlet, Role};
    use crate::store::InMemoryStore;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period() -> PayrollPeriod {
        PayrollPeriod::new(1, 2026).unwrap()
    }

    fn employee(id: &str, name: &str, join_date: Option<NaiveDate>) -> Employee {
        Employee {
            id: id.to_string(),
            full_name: name.to_string(),
            role: Role::Crew,
            is_active: true,
            join_date,
            resign_date: None,
            outlet: Some(Outlet {
                id: "o1".to_string(),
                name: "Kopo".to_string(),
            }),
            distance_km: Some(20.0),
            bank_name: None,
            bank_account_number: None,
        }
    }

    fn create_service() -> HrService {
        let store = InMemoryStore::with_records(
            vec![
                employee("e1", "Budi Santoso", NaiveDate::from_ymd_opt(2026, 1, 5)),
                employee("e2", "Siti Aminah", None),
            ],
            Vec::new(),
        );
        HrService::new(Arc::new(store), EngineConfig::default())
    }

    fn applicant(employee_id: &str) -> ProbationApplicant {
        ProbationApplicant {
            employee_id: employee_id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            experience_level: ExperienceLevel::Inexperienced,
            outlet_name: "Kopo".to_string(),
            sequence: 1,
        }
    }

    /// A store whose writes always fail.
    struct FailingStore {
        inner: InMemoryStore,
    }

    impl FailingStore {
        fn failure(operation: &str) -> EngineError {
            EngineError::StoreError {
                operation: operation.to_string(),
                message: "connection reset".to_string(),
            }
        }
    }

    impl HrStore for FailingStore {
        fn employees(&self) -> EngineResult<Vec<Employee>> {
            self.inner.employees()
        }
        fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
            self.inner.employee(employee_id)
        }
        fn upsert_employee(&self, _: Employee) -> EngineResult<()> {
            Err(Self::failure("upsert_employee"))
        }
        fn contracts(&self) -> EngineResult<Vec<EmploymentContract>> {
            self.inner.contracts()
        }
        fn insert_contract(&self, _: EmploymentContract) -> EngineResult<()> {
            Err(Self::failure("insert_contract"))
        }
        fn attendance(&self, period: PayrollPeriod) -> EngineResult<Vec<AttendanceSummary>> {
            self.inner.attendance(period)
        }
        fn upsert_attendance(&self, _: &[AttendanceSummary]) -> EngineResult<usize> {
            Err(Self::failure("upsert_attendance"))
        }
        fn insert_payroll_entries(
            &self,
            _: &[PayrollEntry],
            _: &[CashAdvance],
        ) -> EngineResult<()> {
            Err(Self::failure("insert_payroll_entries"))
        }
        fn payroll_entries(&self, period: PayrollPeriod) -> EngineResult<Vec<PayrollEntry>> {
            self.inner.payroll_entries(period)
        }
        fn insert_predictions(&self, _: &[ChurnPrediction]) -> EngineResult<()> {
            Err(Self::failure("insert_predictions"))
        }
        fn predictions(&self) -> EngineResult<Vec<ChurnPrediction>> {
            self.inner.predictions()
        }
        fn cash_advances(&self) -> EngineResult<Vec<CashAdvance>> {
            self.inner.cash_advances()
        }
        fn cash_advance(&self, id: Uuid) -> EngineResult<CashAdvance> {
            self.inner.cash_advance(id)
        }
        fn save_cash_advance(&self, _: CashAdvance) -> EngineResult<()> {
            Err(Self::failure("save_cash_advance"))
        }
    }

    #[test]
    fn test_import_then_save_attendance() {
        let service = create_service();

        let outcome = service
            .import_attendance(period(), "BUDI SANTOSO JR;22;0;0;1;3;0;0;0\nNobody;1")
            .unwrap();
        assert_eq!(outcome.matched, 1);
        // Nothing is saved by an import.
        assert!(service.store.attendance(period()).unwrap().is_empty());

        let entries = vec![AttendanceEntry {
            employee_id: "e1".to_string(),
            counts: AttendanceCounts {
                h: 22,
                ..Default::default()
            },
            has_sick_letter: false,
        }];
        assert_eq!(service.save_attendance(period(), &entries).unwrap(), 2);

        let sheet = service.attendance_sheet(period()).unwrap();
        let budi = sheet.rows().iter().find(|r| r.employee_id == "e1").unwrap();
        assert_eq!(budi.counts.h, 22);
    }

    #[test]
    fn test_save_attendance_rejects_unknown_employee() {
        let service = create_service();
        let entries = vec![AttendanceEntry {
            employee_id: "ghost".to_string(),
            counts: AttendanceCounts::default(),
            has_sick_letter: false,
        }];

        assert!(matches!(
            service.save_attendance(period(), &entries),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_payroll_preview_syncs_then_prorates_edited_work_days() {
        let service = create_service();
        service.draft_contract(&applicant("e1")).unwrap();
        service
            .save_attendance(
                period(),
                &[AttendanceEntry {
                    employee_id: "e1".to_string(),
                    counts: AttendanceCounts {
                        h: 13,
                        ..Default::default()
                    },
                    has_sick_letter: false,
                }],
            )
            .unwrap();

        let synced = PayrollOptions {
            sync_attendance: true,
            ..Default::default()
        };
        let board = service.preview_payroll(period(), &synced).unwrap();
        let draft = board.get("e1").unwrap();
        assert_eq!(draft.work_days, 13);
        assert_eq!(draft.basic_salary, dec("1750000"));

        let edited = PayrollOptions {
            edits: vec![PayrollEdit::WorkDays {
                employee_id: "e1".to_string(),
                value: draft.work_days,
            }],
            ..synced
        };
        let board = service.preview_payroll(period(), &edited).unwrap();
        let draft = board.get("e1").unwrap();
        // floor(1,750,000 * 13 / 26)
        assert_eq!(draft.basic_salary, dec("875000"));
        assert_eq!(board.get("e2").unwrap().basic_salary, Decimal::ZERO);
    }

    #[test]
    fn test_payroll_runs_are_appended() {
        let service = create_service();

        let first = service.run_payroll(period(), &PayrollOptions::default()).unwrap();
        let second = service.run_payroll(period(), &PayrollOptions::default()).unwrap();

        assert_ne!(first.run_id, second.run_id);
        let stored = service.payroll_entries(period()).unwrap();
        assert_eq!(stored.len(), 4);
        assert_eq!(stored.iter().filter(|e| e.employee_id == "e1").count(), 2);
    }

    #[test]
    fn test_negative_net_salary_is_kept() {
        let service = create_service();
        let options = PayrollOptions {
            edits: vec![PayrollEdit::Deduction {
                employee_id: "e2".to_string(),
                value: dec("50000"),
            }],
            ..Default::default()
        };

        let run = service.run_payroll(period(), &options).unwrap();
        let entry = run.entries.iter().find(|e| e.employee_id == "e2").unwrap();
        assert_eq!(entry.net_salary, dec("-50000"));
    }

    #[test]
    fn test_configured_absence_penalty_is_injected() {
        let store = InMemoryStore::with_records(
            vec![employee("e1", "Budi Santoso", None)],
            Vec::new(),
        );
        store
            .upsert_attendance(&[AttendanceSummary {
                employee_id: "e1".to_string(),
                month: 1,
                year: 2026,
                counts: AttendanceCounts {
                    h: 20,
                    a: 2,
                    ..Default::default()
                },
                has_sick_letter: false,
            }])
            .unwrap();
        let mut config = EngineConfig::default();
        let payroll = crate::config::PayrollRules {
            absence_penalty_per_day: Some(dec("25000")),
            ..config.payroll().clone()
        };
        config = EngineConfig::new(
            payroll,
            config.salary_matrix().clone(),
            *config.churn(),
            config.contracts().clone(),
        );
        let service = HrService::new(Arc::new(store), config);

        let synced = PayrollOptions {
            sync_attendance: true,
            ..Default::default()
        };
        let board = service.preview_payroll(period(), &synced).unwrap();
        assert_eq!(board.get("e1").unwrap().total_deductions(), dec("50000"));

        // No synced attendance, no penalty.
        let board = service.preview_payroll(period(), &PayrollOptions::default()).unwrap();
        assert_eq!(board.get("e1").unwrap().total_deductions(), Decimal::ZERO);
    }

    #[test]
    fn test_cash_advance_lifecycle_feeds_payroll() {
        let service = create_service();
        let advance = service
            .submit_cash_advance(&AdvanceRequest {
                employee_id: "e2".to_string(),
                amount: dec("300000"),
                reason: "School fees".to_string(),
                deduction_plan_amount: Some(dec("100000")),
                agreement_statement: true,
            })
            .unwrap();

        let approved = service
            .approve_cash_advance(
                advance.id,
                &ApprovalDecision {
                    approved_amount: dec("300000"),
                    deduction_plan_amount: None,
                },
            )
            .unwrap();
        assert_eq!(approved.remaining_amount, dec("300000"));

        let board = service
            .preview_payroll(
                period(),
                &PayrollOptions {
                    deduct_cash_advances: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(board.get("e2").unwrap().total_deductions(), dec("100000"));

        let repaid = service.repay_cash_advance(advance.id, dec("300000")).unwrap();
        assert_eq!(repaid.status, CashAdvanceStatus::PaidOff);
        assert!(service.reject_cash_advance(advance.id).is_err());
    }

    #[test]
    fn test_payroll_runs_repay_cash_advance_installments() {
        let service = create_service();
        let advance = service
            .submit_cash_advance(&AdvanceRequest {
                employee_id: "e2".to_string(),
                amount: dec("200000"),
                reason: "Rent".to_string(),
                deduction_plan_amount: Some(dec("200000")),
                agreement_statement: true,
            })
            .unwrap();
        service
            .approve_cash_advance(
                advance.id,
                &ApprovalDecision {
                    approved_amount: dec("200000"),
                    deduction_plan_amount: None,
                },
            )
            .unwrap();
        let options = PayrollOptions {
            deduct_cash_advances: true,
            ..Default::default()
        };
        let deduction_of = |run: &PayrollRun| {
            run.entries
                .iter()
                .find(|e| e.employee_id == "e2")
                .map(|e| e.deductions)
                .unwrap()
        };

        // A preview never repays.
        service.preview_payroll(period(), &options).unwrap();
        let untouched = service.store.cash_advance(advance.id).unwrap();
        assert_eq!(untouched.remaining_amount, dec("200000"));

        let january = service.run_payroll(period(), &options).unwrap();
        assert_eq!(deduction_of(&january), dec("200000"));

        let february = service
            .run_payroll(PayrollPeriod::new(2, 2026).unwrap(), &options)
            .unwrap();
        assert_eq!(deduction_of(&february), Decimal::ZERO);

        let settled = service.store.cash_advance(advance.id).unwrap();
        assert_eq!(settled.status, CashAdvanceStatus::PaidOff);
        assert_eq!(settled.remaining_amount, Decimal::ZERO);
    }

    #[test]
    fn test_exact_matcher_replaces_prefix_matching() {
        let store = InMemoryStore::with_records(
            vec![employee("e1", "Budi Santoso", None)],
            Vec::new(),
        );
        let service = HrService::new(Arc::new(store), EngineConfig::default())
            .with_matcher(Arc::new(ExactNameMatcher));

        let partial = service
            .import_attendance(period(), "BUDI SANTOSO JR;22;0;0;0;4;0;0;0")
            .unwrap();
        assert_eq!(partial.matched, 0);

        let exact = service
            .import_attendance(period(), "budi santoso;22;0;0;0;4;0;0;0")
            .unwrap();
        assert_eq!(exact.matched, 1);
    }

    #[test]
    fn test_cash_advance_requires_known_employee() {
        let service = create_service();
        let result = service.submit_cash_advance(&AdvanceRequest {
            employee_id: "ghost".to_string(),
            amount: dec("1000"),
            reason: "Rent".to_string(),
            deduction_plan_amount: None,
            agreement_statement: false,
        });

        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_churn_batches_feed_overview() {
        let service = create_service();
        service.run_churn_predictions().unwrap();
        let latest = service.run_churn_predictions().unwrap();

        let overview = service.risk_overview().unwrap();
        assert_eq!(overview.batch_id, latest.first().map(|p| p.batch_id));
        assert_eq!(overview.top_risks.len(), 2);
        assert!(service.export_risks_csv().unwrap().starts_with("Name,Outlet,Role,Risk Score\n"));
    }

    #[test]
    fn test_store_failure_surfaces_once() {
        let inner = InMemoryStore::with_records(
            vec![employee("e1", "Budi Santoso", None)],
            Vec::new(),
        );
        let service = HrService::new(Arc::new(FailingStore { inner }), EngineConfig::default());

        match service.run_payroll(period(), &PayrollOptions::default()) {
            Err(EngineError::StoreError { operation, .. }) => {
                assert_eq!(operation, "insert_payroll_entries");
            }
            other => panic!("Expected StoreError, got {:?}", other),
        }
        assert!(matches!(
            service.run_churn_predictions(),
            Err(EngineError::StoreError { .. })
        ));
        assert!(service.payroll_entries(period()).unwrap().is_empty());
    }
}
