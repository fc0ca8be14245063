//! Response types for the HRIS API.
//!
//! This module defines the JSON views returned by the handlers and the
//! mapping of engine errors onto HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{AttendanceSheet, OutletGroup, PayrollBoard, PayrollDraft, UploadOutcome};
use crate::error::EngineError;
use crate::models::{ChurnPrediction, Employee, PayrollPeriod};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            EngineError::CashAdvanceNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("CASH_ADVANCE_NOT_FOUND", message),
            ),
            EngineError::InvalidCashAdvance { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_CASH_ADVANCE", message),
            ),
            EngineError::StoreError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "STORE_ERROR",
                    "Storage failure",
                    format!("{}; nothing from this request was saved", message),
                ),
            ),
            EngineError::CalculationError { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// An attendance sheet grouped by outlet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSheetResponse {
    /// Month of the sheet.
    pub month: u32,
    /// Year of the sheet.
    pub year: i32,
    /// Rows grouped by outlet.
    pub outlets: Vec<OutletGroup>,
}

impl AttendanceSheetResponse {
    /// Groups a sheet, optionally filtered by `search`.
    pub fn new(sheet: &AttendanceSheet, search: Option<&str>) -> Self {
        let period = sheet.period();
        Self {
            month: period.month,
            year: period.year,
            outlets: sheet.grouped(search),
        }
    }
}

/// The sheet after an upload, with match counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Employees whose counters came from the upload.
    pub matched: usize,
    /// Matches where more than one uploaded row qualified.
    pub ambiguous: usize,
    /// The updated, unsaved sheet.
    pub sheet: AttendanceSheetResponse,
}

impl From<UploadOutcome> for ImportResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            matched: outcome.matched,
            ambiguous: outcome.ambiguous,
            sheet: AttendanceSheetResponse::new(&outcome.sheet, None),
        }
    }
}

/// Result of saving an attendance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAttendanceResponse {
    /// Summaries written.
    pub saved: usize,
}

/// One payroll draft with its computed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftView {
    /// The draft.
    #[serde(flatten)]
    pub draft: PayrollDraft,
    /// basic + bonus + allowance + overtime.
    pub total_salary: Decimal,
    /// Manual plus injected deductions.
    pub total_deductions: Decimal,
    /// Total salary minus deductions.
    pub net_salary: Decimal,
    /// Notes as they will be stored.
    pub notes: String,
}

impl From<&PayrollDraft> for DraftView {
    fn from(draft: &PayrollDraft) -> Self {
        Self {
            total_salary: draft.total_salary(),
            total_deductions: draft.total_deductions(),
            net_salary: draft.net_salary(),
            notes: draft.notes(),
            draft: draft.clone(),
        }
    }
}

/// A payroll preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollPreviewResponse {
    /// Month being drafted.
    pub month: u32,
    /// Year being drafted.
    pub year: i32,
    /// Drafts ordered by employee id.
    pub drafts: Vec<DraftView>,
}

impl From<&PayrollBoard> for PayrollPreviewResponse {
    fn from(board: &PayrollBoard) -> Self {
        let PayrollPeriod { year, month } = board.period();
        Self {
            month,
            year,
            drafts: board.drafts().map(DraftView::from).collect(),
        }
    }
}

/// A stored churn batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnRunResponse {
    /// Batch id; absent when there were no active employees.
    pub batch_id: Option<Uuid>,
    /// The stored predictions.
    pub predictions: Vec<ChurnPrediction>,
}

impl From<Vec<ChurnPrediction>> for ChurnRunResponse {
    fn from(predictions: Vec<ChurnPrediction>) -> Self {
        Self {
            batch_id: predictions.first().map(|p| p.batch_id),
            predictions,
        }
    }
}

/// An employee with their length of service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeView {
    /// The employee.
    #[serde(flatten)]
    pub employee: Employee,
    /// e.g. "2 yrs 3 mos"; absent without a join date.
    pub work_duration: Option<String>,
}

impl EmployeeView {
    /// Describes an employee as of a date.
    pub fn new(employee: Employee, as_of: NaiveDate) -> Self {
        Self {
            work_duration: employee.work_duration(as_of),
            employee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        let response: ApiErrorResponse = EngineError::EmployeeNotFound {
            employee_id: "crew_404".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "EMPLOYEE_NOT_FOUND");
        assert!(response.error.message.contains("crew_404"));

        let response: ApiErrorResponse =
            EngineError::CashAdvanceNotFound { id: Uuid::nil() }.into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let response: ApiErrorResponse = EngineError::StoreError {
            operation: "insert_payroll_entries".to_string(),
            message: "connection reset".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "STORE_ERROR");
        assert!(response.error.details.unwrap().contains("insert_payroll_entries"));
    }

    #[test]
    fn test_invalid_period_maps_to_400() {
        let response: ApiErrorResponse = EngineError::InvalidPeriod {
            month: 13,
            year: 2026,
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_PERIOD");
    }

    #[test]
    fn test_draft_view_carries_totals() {
        let mut draft = PayrollDraft::blank("e1", "Budi", 26);
        draft.basic_salary = Decimal::new(1_000_000, 0);
        draft.deduction = Decimal::new(50_000, 0);

        let json = serde_json::to_value(DraftView::from(&draft)).unwrap();
        assert_eq!(json["employee_id"], "e1");
        assert_eq!(json["net_salary"], "950000");
    }
}
