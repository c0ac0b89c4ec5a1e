use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::ProgramId;
use super::costs::{dialysis_cost, indirect_cost, recommended_aid, IndirectCost};
use super::denial::{denial_reasons, program_gaps, DenialReason, ProgramGap};
use super::eligibility::{eligible_for_aid, eligible_programs, missing_critical_data};
use super::facts::{attributes, Subject, SubjectId};
use super::recommender::{recommend, RecommendationBranch};
use super::scoring::{priority_score, ScoreBreakdown};
use super::store::FactStore;
use super::validation::{SubjectValidator, ValidationError};

/// Why a tracked attribute could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKind {
    Absent,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDataFlag {
    pub attribute: String,
    pub kind: MissingKind,
}

const TRACKED_ATTRIBUTES: [&str; 5] = [
    attributes::INCOME,
    attributes::HEALTH_CONDITION,
    attributes::ACCESS_TO_HEALTHCARE,
    attributes::INCOME_CERTIFICATE,
    attributes::MEDICAL_REPORT,
];

pub fn missing_data_flags(subject: &Subject) -> Vec<MissingDataFlag> {
    TRACKED_ATTRIBUTES
        .iter()
        .filter_map(|attribute| {
            let kind = if !subject.is_present(attribute) {
                MissingKind::Absent
            } else if subject.is_unknown(attribute) {
                MissingKind::Unknown
            } else {
                return None;
            };
            Some(MissingDataFlag {
                attribute: attribute.to_string(),
                kind,
            })
        })
        .collect()
}

/// Everything derived for one subject in one call. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub subject_id: SubjectId,
    pub eligible_for_aid: bool,
    pub missing_critical_data: bool,
    pub missing_data: Vec<MissingDataFlag>,
    pub scores: ScoreBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<i64>,
    pub eligible_programs: Vec<ProgramId>,
    pub recommended_program: ProgramId,
    pub recommendation_branch: RecommendationBranch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialysis_cost: Option<u64>,
    pub indirect_cost: IndirectCost,
    pub recommended_aid: u64,
    pub denial_reasons: Vec<DenialReason>,
    pub program_gaps: Vec<ProgramGap>,
}

impl EvaluationResult {
    pub fn decision_summary(&self) -> String {
        if self.eligible_for_aid {
            return "eligible for financial aid".to_string();
        }

        let reasons: Vec<String> = self.denial_reasons.iter().map(DenialReason::summary).collect();
        format!("not eligible: {}", reasons.join("; "))
    }
}

/// Stateless evaluator: validates a subject, then runs every rule against it.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    validator: SubjectValidator,
}

impl EvaluationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, subject: &Subject) -> Result<EvaluationResult, ValidationError> {
        self.validator.validate(subject)?;

        let recommendation = recommend(subject);
        let result = EvaluationResult {
            subject_id: subject.id.clone(),
            eligible_for_aid: eligible_for_aid(subject),
            missing_critical_data: missing_critical_data(subject),
            missing_data: missing_data_flags(subject),
            scores: ScoreBreakdown::for_subject(subject),
            priority_score: priority_score(subject),
            eligible_programs: eligible_programs(subject),
            recommended_program: recommendation.program,
            recommendation_branch: recommendation.branch,
            dialysis_cost: dialysis_cost(subject),
            indirect_cost: indirect_cost(subject),
            recommended_aid: recommended_aid(subject),
            denial_reasons: denial_reasons(subject),
            program_gaps: program_gaps(subject),
        };

        debug!(
            subject = %result.subject_id,
            eligible = result.eligible_for_aid,
            recommended = %result.recommended_program,
            total_score = result.scores.total,
            "subject evaluated"
        );

        Ok(result)
    }

    /// Evaluate every subject in a snapshot, in identifier order.
    pub fn evaluate_all(
        &self,
        store: &FactStore,
    ) -> Vec<(SubjectId, Result<EvaluationResult, ValidationError>)> {
        store
            .subjects()
            .map(|subject| (subject.id.clone(), self.evaluate(subject)))
            .collect()
    }
}
