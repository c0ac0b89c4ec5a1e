//! CKD financial-aid assessment: subject facts, eligibility rules, scoring, cost estimates
//! and program recommendations, plus the repository, service and HTTP surface around them.
//!
//! Every rule is a pure function of one `Subject`. The engine never mutates what it reads;
//! storage and merging live in `store` and `repository`.

pub mod catalog;
pub mod costs;
pub mod denial;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod facts;
pub mod ingest;
pub mod recommender;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{Program, ProgramCatalog, ProgramId};
pub use costs::{dialysis_cost, indirect_cost, recommended_aid, IndirectCost};
pub use denial::{denial_reasons, program_gaps, DenialReason, ProgramGap};
pub use domain::{HealthCondition, HealthcareAccess};
pub use eligibility::{
    document_check, eligible_for_aid, eligible_programs, has_all_required_data,
    is_eligible_for, missing_critical_data,
};
pub use engine::{EvaluationEngine, EvaluationResult, MissingDataFlag, MissingKind};
pub use facts::{attributes, AttributeMap, AttributeValue, Subject, SubjectId, UNKNOWN};
pub use ingest::IngestError;
pub use recommender::{recommend, recommend_aid_program, Recommendation, RecommendationBranch};
pub use repository::{InMemorySubjectRepository, RepositoryError, SubjectRepository};
pub use router::assessment_router;
pub use scoring::{
    accessibility_score, dependency_score, economic_vulnerability_score,
    health_severity_score, priority_score, total_aid_match_score, ScoreBreakdown,
};
pub use service::{AssessmentService, AssessmentServiceError, BatchAssessment};
pub use store::{FactStore, MergePolicy};
pub use validation::{SubjectValidator, ValidationError};
