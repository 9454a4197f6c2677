use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{ReportError, ReportService};
use crate::workflows::directory::domain::{DepartmentId, UserId};
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::evaluation::repository::EvaluationRepository;

/// Router builder for the aggregate report endpoints.
pub fn report_router<D, E>(service: Arc<ReportService<D, E>>) -> Router
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/reports/departments/:department_id",
            get(department_handler::<D, E>),
        )
        .route(
            "/api/v1/reports/employees/:user_id",
            get(employee_handler::<D, E>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerQuery {
    viewer: u64,
}

fn error_response(error: ReportError) -> Response {
    let status = match &error {
        ReportError::Forbidden => StatusCode::FORBIDDEN,
        ReportError::NotFound => StatusCode::NOT_FOUND,
        ReportError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn department_handler<D, E>(
    State(service): State<Arc<ReportService<D, E>>>,
    Path(department_id): Path<u64>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.department_report(UserId(query.viewer), DepartmentId(department_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employee_handler<D, E>(
    State(service): State<Arc<ReportService<D, E>>>,
    Path(user_id): Path<u64>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.employee_report(UserId(query.viewer), UserId(user_id)) {
        Ok(points) => (StatusCode::OK, axum::Json(points)).into_response(),
        Err(error) => error_response(error),
    }
}
