//! HTTP request handlers for the HRIS API.
//!
//! This module contains the router and the handler functions for all API
//! endpoints. Every request is logged with a correlation id on entry and on
//! completion or failure.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{AdvanceRequest, ApprovalDecision, ProbationApplicant};
use crate::error::EngineError;
use crate::models::PayrollPeriod;
use crate::service::PayrollOptions;

use super::request::{
    EmployeeRequest, PayrollRequest, RepaymentRequest, SaveAttendanceRequest, SheetQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceSheetResponse, ChurnRunResponse, EmployeeView,
    ImportResponse, PayrollPreviewResponse, SaveAttendanceResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(save_employee))
        .route(
            "/attendance/:year/:month",
            get(attendance_sheet).put(save_attendance),
        )
        .route("/attendance/:year/:month/import", post(import_attendance))
        .route("/payroll/:year/:month/preview", post(preview_payroll))
        .route("/payroll/:year/:month/runs", post(run_payroll))
        .route("/payroll/:year/:month/entries", get(payroll_entries))
        .route("/churn/predictions", post(run_churn_predictions))
        .route("/churn/overview", get(churn_overview))
        .route("/churn/export", get(export_churn_csv))
        .route(
            "/cash-advances",
            get(list_cash_advances).post(submit_cash_advance),
        )
        .route("/cash-advances/:id/approve", post(approve_cash_advance))
        .route("/cash-advances/:id/reject", post(reject_cash_advance))
        .route("/cash-advances/:id/repayments", post(repay_cash_advance))
        .route("/contracts/probation", post(draft_probation_contract))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body, turning a rejection into a 400 response.
fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Handler for GET /employees.
async fn list_employees(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing employees");

    let today = Utc::now().date_naive();
    match state.service().employees() {
        Ok(employees) => {
            let views: Vec<EmployeeView> = employees
                .into_iter()
                .map(|e| EmployeeView::new(e, today))
                .collect();
            json_response(StatusCode::OK, views)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /employees.
async fn save_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, employee_id = %request.id, "Saving employee");

    match state.service().save_employee(request.into()) {
        Ok(employee) => json_response(
            StatusCode::CREATED,
            EmployeeView::new(employee, Utc::now().date_naive()),
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /attendance/:year/:month.
async fn attendance_sheet(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<SheetQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, year, month, "Loading attendance sheet");

    match PayrollPeriod::new(month, year).and_then(|p| state.service().attendance_sheet(p)) {
        Ok(sheet) => json_response(
            StatusCode::OK,
            AttendanceSheetResponse::new(&sheet, query.search.as_deref()),
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /attendance/:year/:month/import.
///
/// The body is the raw upload text; the result is not saved.
async fn import_attendance(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        year,
        month,
        upload_bytes = body.len(),
        "Importing attendance upload"
    );

    // Bytes that are not UTF-8 only spoil the row they sit in.
    let upload = String::from_utf8_lossy(&body);
    match PayrollPeriod::new(month, year)
        .and_then(|p| state.service().import_attendance(p, &upload))
    {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                matched = outcome.matched,
                "Attendance upload applied"
            );
            json_response(StatusCode::OK, ImportResponse::from(outcome))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /attendance/:year/:month.
async fn save_attendance(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    payload: Result<Json<SaveAttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        year,
        month,
        rows = request.rows.len(),
        "Saving attendance"
    );

    match PayrollPeriod::new(month, year)
        .and_then(|p| state.service().save_attendance(p, &request.rows))
    {
        Ok(saved) => json_response(StatusCode::OK, SaveAttendanceResponse { saved }),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/:year/:month/preview.
async fn preview_payroll(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, year, month, "Previewing payroll");

    let options: PayrollOptions = request.into();
    match PayrollPeriod::new(month, year)
        .and_then(|p| state.service().preview_payroll(p, &options))
    {
        Ok(board) => json_response(StatusCode::OK, PayrollPreviewResponse::from(&board)),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/:year/:month/runs.
///
/// Every call stores a new run; earlier runs of the period are kept.
async fn run_payroll(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, year, month, "Running payroll");

    let options: PayrollOptions = request.into();
    match PayrollPeriod::new(month, year).and_then(|p| state.service().run_payroll(p, &options)) {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                entries = run.entries.len(),
                "Payroll run completed"
            );
            json_response(StatusCode::CREATED, run)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /payroll/:year/:month/entries.
async fn payroll_entries(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, year, month, "Listing payroll entries");

    match PayrollPeriod::new(month, year).and_then(|p| state.service().payroll_entries(p)) {
        Ok(entries) => json_response(StatusCode::OK, entries),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /churn/predictions.
async fn run_churn_predictions(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Running churn predictions");

    match state.service().run_churn_predictions() {
        Ok(predictions) => json_response(StatusCode::CREATED, ChurnRunResponse::from(predictions)),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /churn/overview.
async fn churn_overview(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Loading churn overview");

    match state.service().risk_overview() {
        Ok(overview) => json_response(StatusCode::OK, overview),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /churn/export.
async fn export_churn_csv(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Exporting churn risks");

    match state.service().export_risks_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"churn_risks.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /cash-advances.
async fn list_cash_advances(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing cash advances");

    match state.service().cash_advances() {
        Ok(advances) => json_response(StatusCode::OK, advances),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /cash-advances.
async fn submit_cash_advance(
    State(state): State<AppState>,
    payload: Result<Json<AdvanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Submitting cash advance"
    );

    match state.service().submit_cash_advance(&request) {
        Ok(advance) => json_response(StatusCode::CREATED, advance),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /cash-advances/:id/approve.
async fn approve_cash_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ApprovalDecision>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let decision = match json_body(correlation_id, payload) {
        Ok(decision) => decision,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, advance_id = %id, "Approving cash advance");

    match state.service().approve_cash_advance(id, &decision) {
        Ok(advance) => json_response(StatusCode::OK, advance),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /cash-advances/:id/reject.
async fn reject_cash_advance(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, advance_id = %id, "Rejecting cash advance");

    match state.service().reject_cash_advance(id) {
        Ok(advance) => json_response(StatusCode::OK, advance),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /cash-advances/:id/repayments.
async fn repay_cash_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<RepaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        advance_id = %id,
        amount = %request.amount,
        "Recording cash advance repayment"
    );

    match state.service().repay_cash_advance(id, request.amount) {
        Ok(advance) => json_response(StatusCode::OK, advance),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /contracts/probation.
async fn draft_probation_contract(
    State(state): State<AppState>,
    payload: Result<Json<ProbationApplicant>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let applicant = match json_body(correlation_id, payload) {
        Ok(applicant) => applicant,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %applicant.employee_id,
        outlet = %applicant.outlet_name,
        "Drafting probation contract"
    );

    match state.service().draft_contract(&applicant) {
        Ok(contract) => json_response(StatusCode::CREATED, contract),
        Err(err) => error_response(correlation_id, err),
    }
}
