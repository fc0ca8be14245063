//! HTTP API module for the HRIS engine.
//!
//! This module provides the REST endpoints for attendance, payroll, churn
//! risk, cash advances, probation contracts and the employee roster.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeRequest, PayrollRequest, RepaymentRequest, SaveAttendanceRequest, SheetQuery,
};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceSheetResponse, ChurnRunResponse, DraftView,
    EmployeeView, ImportResponse, PayrollPreviewResponse, SaveAttendanceResponse,
};
pub use state::AppState;
