//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::source::AttendanceSource;

use super::request::{DailyStatusRequest, ImportRequest, ManualStatusRequest, RankingRequest};
use super::response::{ApiError, ApiErrorResponse, DailyStatusResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/records/import", post(import_handler))
        .route("/ranking", post(ranking_handler))
        .route("/daily-status", post(daily_status_handler))
        .route("/manual-status", put(manual_status_handler))
        .with_state(state)
}

/// Handler for POST /records/import.
///
/// Loads persons, events and leave into the store and reports what changed,
/// including legacy leave keys that could not be matched to a person.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing import request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let summary = state.engine().write().await.source_mut().import(
        request.persons,
        request.events,
        request.leaves,
    );

    info!(
        correlation_id = %correlation_id,
        persons = summary.persons,
        events = summary.events,
        leaves = summary.leaves,
        rewritten_leave_keys = summary.rewritten_leave_keys,
        "Import completed"
    );
    json_response(StatusCode::OK, &summary)
}

/// Handler for POST /ranking.
///
/// Ranks the active roster of one category, optionally filtered by
/// position, over the requested period.
async fn ranking_handler(
    State(state): State<AppState>,
    payload: Result<Json<RankingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ranking request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let engine = state.engine().read().await;
    let result = engine
        .source()
        .active_persons(request.category, request.position.as_deref())
        .and_then(|persons| {
            engine.compute_ranking(
                &persons,
                request.range(),
                request.scoring_mode,
                request.report_mode,
            )
        });

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %report.report_id,
                category = %request.category,
                entries = report.entries.len(),
                active_school_days = report.active_school_days,
                duration_us = start_time.elapsed().as_micros(),
                "Ranking completed successfully"
            );
            json_response(StatusCode::OK, &report)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /daily-status.
async fn daily_status_handler(
    State(state): State<AppState>,
    payload: Result<Json<DailyStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let engine = state.engine().read().await;
    let result = engine
        .source()
        .find_person(&request.identifier)
        .and_then(|person| {
            person.ok_or_else(|| EngineError::PersonNotFound {
                identifier: request.identifier.clone(),
            })
        })
        .and_then(|person| engine.report_status(&person, request.date, request.report_mode));

    match result {
        Ok(status) => {
            info!(
                correlation_id = %correlation_id,
                identifier = %request.identifier,
                date = %request.date,
                status = %status,
                "Daily status resolved"
            );
            json_response(
                StatusCode::OK,
                &DailyStatusResponse {
                    identifier: request.identifier,
                    date: request.date,
                    report_mode: request.report_mode,
                    status,
                    code: status.code().to_string(),
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for PUT /manual-status.
///
/// Applies a manual edit and returns the cell's status before and after.
async fn manual_status_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManualStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing manual status request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let mut engine = state.engine().write().await;
    let person = match engine.source().find_person(&request.identifier) {
        Ok(Some(person)) => person,
        Ok(None) => {
            let err = EngineError::PersonNotFound {
                identifier: request.identifier,
            };
            return engine_error_response(err, correlation_id);
        }
        Err(err) => return engine_error_response(err, correlation_id),
    };

    match engine.set_manual_status(&person, request.date, request.direction, &request.code) {
        Ok(change) => {
            info!(
                correlation_id = %correlation_id,
                identifier = %change.identifier,
                current = %change.current,
                "Manual status applied"
            );
            json_response(StatusCode::OK, &change)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    json_response(StatusCode::BAD_REQUEST, &error)
}
