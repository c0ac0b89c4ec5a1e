use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::facts::attributes::*;
use crate::assessment::repository::{
    InMemorySubjectRepository, RepositoryError, SubjectRepository,
};
use crate::assessment::store::{FactStore, MergePolicy};
use crate::assessment::{AssessmentService, Subject, SubjectId};

/// Stage 4, low income, no access, documents in order. Qualifies for aid.
pub(super) fn eligible_subject() -> Subject {
    Subject::new("nimal")
        .with(INCOME, 12000)
        .with(HEALTH_CONDITION, "stage_4_ckd")
        .with(ACCESS_TO_HEALTHCARE, "no")
        .with(INCOME_CERTIFICATE, "yes")
        .with(MEDICAL_REPORT, "recent")
        .with(DEPENDENT_CHILDREN, 0)
        .with(ELDERLY_DEPENDENTS, 0)
}

pub(super) fn end_stage_subject() -> Subject {
    Subject::new("ruwan")
        .with(HEALTH_CONDITION, "stage_5_ckd")
        .with(DEPENDENT_CHILDREN, 0)
        .with(ELDERLY_DEPENDENTS, 0)
}

pub(super) fn rural_single_parent() -> Subject {
    Subject::new("chamari")
        .with(INCOME, 12000)
        .with(MARITAL_STATUS, "single")
        .with(DEPENDENT_CHILDREN, 2)
        .with(LOCATION, "Anuradhapura")
}

pub(super) fn elderly_widow() -> Subject {
    Subject::new("kamala")
        .with(AGE, 67)
        .with(INCOME, 9000)
        .with(GENDER, "female")
        .with(MARITAL_STATUS, "single")
        .with(FAMILY_STRUCTURE, "nuclear")
}

pub(super) fn build_service() -> (
    AssessmentService<InMemorySubjectRepository>,
    Arc<InMemorySubjectRepository>,
) {
    let repository = Arc::new(InMemorySubjectRepository::new(MergePolicy::Union));
    let service = AssessmentService::new(repository.clone());
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl SubjectRepository for UnavailableRepository {
    fn merge(&self, _subject: Subject) -> Result<Subject, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SubjectId) -> Result<Option<Subject>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn snapshot(&self) -> Result<FactStore, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
