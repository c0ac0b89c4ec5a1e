use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::catalog::ProgramCatalog;
use super::facts::{AttributeMap, Subject, SubjectId};
use super::repository::{RepositoryError, SubjectRepository};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing HTTP endpoints for assessment and subject intake.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: SubjectRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<R>))
        .route("/api/v1/subjects/:subject_id", put(register_handler::<R>))
        .route(
            "/api/v1/subjects/:subject_id/assessment",
            get(stored_assessment_handler::<R>),
        )
        .route("/api/v1/programs", get(programs_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(subject): axum::Json<Subject>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    match service.assess(&subject) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(subject_id): Path<String>,
    axum::Json(attributes): axum::Json<AttributeMap>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    let subject = attributes.into_subject(SubjectId::normalized(&subject_id));
    match service.register(subject) {
        Ok(stored) => (StatusCode::ACCEPTED, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stored_assessment_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    R: SubjectRepository + 'static,
{
    let id = SubjectId::normalized(&subject_id);
    match service.assess_stored(&id) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "subject_id": id.0,
                "error": "subject not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn programs_handler() -> Response {
    let catalog = ProgramCatalog::standard();
    (StatusCode::OK, axum::Json(catalog.programs())).into_response()
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
