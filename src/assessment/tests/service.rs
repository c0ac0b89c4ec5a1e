use std::sync::Arc;

use super::common::*;
use crate::assessment::facts::attributes::*;
use crate::assessment::repository::{
    InMemorySubjectRepository, RepositoryError, SubjectRepository,
};
use crate::assessment::store::{FactStore, MergePolicy};
use crate::assessment::{
    AssessmentService, AssessmentServiceError, ProgramId, Subject, SubjectId, ValidationError,
};

#[test]
fn assess_propagates_validation_errors() {
    let (service, _) = build_service();

    match service.assess(&Subject::new("x").with(INCOME, -100)) {
        Err(AssessmentServiceError::Validation(ValidationError::NegativeValue {
            attribute,
            value,
        })) => {
            assert_eq!(attribute, INCOME);
            assert_eq!(value, -100);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn register_rejects_invalid_subjects_before_storing() {
    let (service, repository) = build_service();

    let result = service.register(Subject::new("x").with(HEALTH_CONDITION, "stage_9_ckd"));

    assert!(matches!(
        result,
        Err(AssessmentServiceError::Validation(
            ValidationError::UnrecognizedHealthCondition { .. }
        ))
    ));
    assert!(repository
        .fetch(&SubjectId::new("x"))
        .expect("fetch succeeds")
        .is_none());
}

#[test]
fn registered_records_merge_before_assessment() {
    let (service, _) = build_service();
    let id = SubjectId::new("nimal");

    service
        .register(Subject::new("nimal").with(HEALTH_CONDITION, "hypertension"))
        .expect("first record stored");
    let stored = service
        .register(eligible_subject())
        .expect("second record stored");

    assert!(stored.has(HEALTH_CONDITION, "hypertension"));
    assert!(stored.has(HEALTH_CONDITION, "stage_4_ckd"));

    let result = service.assess_stored(&id).expect("stored subject assessed");
    assert!(result.eligible_for_aid);
    assert_eq!(result.priority_score, Some(22));
    assert_eq!(result.recommended_program, ProgramId::EmergencyMedicalSupport);
}

#[test]
fn assess_survives_huge_dependant_counts() {
    let (service, _) = build_service();
    let subject = Subject::new("nuwan")
        .with(INCOME, 12000)
        .with(DEPENDENT_CHILDREN, i64::MAX / 2);

    let result = service.assess(&subject).expect("valid subject");

    assert_eq!(result.priority_score, Some(i64::MAX));
    assert_eq!(result.recommended_aid, u64::MAX);
    assert_eq!(result.scores.dependency, 10);
}

#[test]
fn assess_stored_reports_unknown_subjects() {
    let (service, _) = build_service();

    match service.assess_stored(&SubjectId::new("ghost")) {
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn assess_all_separates_rejected_records() {
    let mut store = FactStore::new();
    store.insert(Subject::new("broken").with(AGE, -3));
    let repository = Arc::new(InMemorySubjectRepository::with_store(
        store,
        MergePolicy::Union,
    ));
    let service = AssessmentService::new(repository);
    service.register(eligible_subject()).expect("stored");
    service.register(elderly_widow()).expect("stored");

    let batch = service.assess_all().expect("snapshot available");

    let evaluated: Vec<_> = batch
        .results
        .iter()
        .map(|result| result.subject_id.as_str())
        .collect();
    assert_eq!(evaluated, vec!["kamala", "nimal"]);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].0, SubjectId::new("broken"));
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service = AssessmentService::new(Arc::new(UnavailableRepository));

    match service.assess_all() {
        Err(AssessmentServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "store offline");
        }
        other => panic!("expected unavailable repository, got {other:?}"),
    }
    assert!(matches!(
        service.register(eligible_subject()),
        Err(AssessmentServiceError::Repository(_))
    ));
}

#[test]
fn assess_does_not_touch_the_repository() {
    let service = AssessmentService::new(Arc::new(UnavailableRepository));

    let result = service
        .assess(&elderly_widow())
        .expect("stateless assessment succeeds");

    assert!(!result.eligible_for_aid);
    assert!(result.missing_critical_data);
}
