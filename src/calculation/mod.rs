//! Calculation logic for the HRIS engine.
//!
//! This module contains the pure calculators: attendance upload parsing
//! and matching, the monthly attendance sheet, tenure-tiered base salary
//! derivation with first-month pro-ration, the payroll drafting board and
//! its deduction policies, churn risk scoring with its dashboard views,
//! probation contract drafting and the cash advance workflow.
//!
//! None of these functions perform I/O; the [`service`](crate::service)
//! layer fetches their inputs and persists their outputs.

mod attendance_sheet;
mod cash_advance;
mod churn;
mod churn_overview;
mod deduction;
mod name_matcher;
mod payroll_board;
mod probation_contract;
mod proration;
mod roster_upload;
mod salary_tier;

pub use attendance_sheet::{
    AttendanceRow, AttendanceSheet, OutletGroup, UNASSIGNED_OUTLET, UploadOutcome,
};
pub use cash_advance::{
    AdvanceRequest, ApprovalDecision, approve_advance, record_repayment, reject_advance,
    submit_advance,
};
pub use churn::{ChurnScore, predict_batch, risk_level, score, tenure_months};
pub use churn_overview::{
    OutletRisk, RiskEntry, RiskOverview, UNKNOWN_OUTLET, latest_batch,
};
pub use deduction::{CashAdvanceInstallment, DeductionPolicy, UnexcusedAbsencePenalty};
pub use name_matcher::{ExactNameMatcher, NameMatcher, TwoTokenPrefixMatcher};
pub use payroll_board::{PayrollBoard, PayrollDraft, PayrollEdit};
pub use probation_contract::{
    ProbationApplicant, contract_number, draft_probation_contract, roman_month,
};
pub use proration::{ProrationResult, prorate_first_month};
pub use roster_upload::{RosterRow, UPLOAD_DELIMITER, parse_roster};
pub use salary_tier::{
    BaseSalaryResult, CONTRACT_SALARY_NOTE, NO_CONTRACT_NOTE, NO_JOIN_DATE_NOTE,
    derive_base_salary, months_of_service,
};
