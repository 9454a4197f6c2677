use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EvaluationStatus, ResponseId};
use super::repository::EvaluationRepository;
use super::service::{EvaluationEntry, HrAction, ReviewService, WorkflowError};
use crate::workflows::directory::domain::UserId;
use crate::workflows::directory::repository::DirectoryRepository;

/// Router builder exposing the review workflow endpoints. The acting user is
/// always explicit: a `viewer` query parameter on reads, a body field on
/// writes.
pub fn review_router<D, E>(service: Arc<ReviewService<D, E>>) -> Router
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/reviews/home", get(home_handler::<D, E>))
        .route("/api/v1/reviews/employees", get(roster_handler::<D, E>))
        .route(
            "/api/v1/reviews/employees/:user_id/surveys",
            get(employee_surveys_handler::<D, E>),
        )
        .route(
            "/api/v1/reviews/responses/:response_id/overview",
            get(overview_handler::<D, E>),
        )
        .route(
            "/api/v1/reviews/responses/:response_id/evaluation",
            get(evaluation_form_handler::<D, E>).post(evaluation_handler::<D, E>),
        )
        .route(
            "/api/v1/reviews/responses/:response_id/hr-comment",
            post(hr_comment_handler::<D, E>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerQuery {
    viewer: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationBody {
    evaluator: u64,
    save_type: EvaluationStatus,
    entries: Vec<EvaluationEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HrCommentBody {
    author: u64,
    #[serde(default)]
    comment: String,
    action: HrAction,
}

fn error_response(error: WorkflowError) -> Response {
    let status = match &error {
        WorkflowError::Forbidden => StatusCode::FORBIDDEN,
        WorkflowError::NotFound => StatusCode::NOT_FOUND,
        WorkflowError::ValidationFailed { .. } | WorkflowError::ScaleOutOfRange { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        WorkflowError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn home_handler<D, E>(
    State(service): State<Arc<ReviewService<D, E>>>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.home_overview(UserId(query.viewer)) {
        Ok(standings) => (StatusCode::OK, axum::Json(standings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn roster_handler<D, E>(
    State(service): State<Arc<ReviewService<D, E>>>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.roster(UserId(query.viewer)) {
        Ok(roster) => (StatusCode::OK, axum::Json(roster)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employee_surveys_handler<D, E>(
    State(service): State<Arc<ReviewService<D, E>>>,
    Path(user_id): Path<u64>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.employee_surveys(UserId(query.viewer), UserId(user_id)) {
        Ok(standings) => (StatusCode::OK, axum::Json(standings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn overview_handler<D, E>(
    State(service): State<Arc<ReviewService<D, E>>>,
    Path(response_id): Path<u64>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.response_overview(UserId(query.viewer), ResponseId(response_id)) {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_form_handler<D, E>(
    State(service): State<Arc<ReviewService<D, E>>>,
    Path(response_id): Path<u64>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.evaluator_entries(UserId(query.viewer), ResponseId(response_id)) {
        Ok(rows) => (StatusCode::OK, axum::Json(rows)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_handler<D, E>(
    State(service): State<Arc<ReviewService<D, E>>>,
    Path(response_id): Path<u64>,
    axum::Json(body): axum::Json<EvaluationBody>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.save_manager_evaluation(
        UserId(body.evaluator),
        ResponseId(response_id),
        body.entries,
        body.save_type,
    ) {
        Ok(rollup) => {
            let payload = json!({
                "manager_status": rollup.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn hr_comment_handler<D, E>(
    State(service): State<Arc<ReviewService<D, E>>>,
    Path(response_id): Path<u64>,
    axum::Json(body): axum::Json<HrCommentBody>,
) -> Response
where
    D: DirectoryRepository + 'static,
    E: EvaluationRepository + 'static,
{
    match service.set_hr_comment(
        UserId(body.author),
        ResponseId(response_id),
        body.comment,
        body.action,
    ) {
        Ok(row) => {
            let payload = json!({
                "status": row.status.label(),
                "completed_at": row.completed_at,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
