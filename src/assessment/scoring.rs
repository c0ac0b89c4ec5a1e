//! Sub-scores, their aggregate, and the separately defined priority score.
//!
//! Each sub-score is a first-match cascade: the first band that applies decides the score
//! and later bands are never added on top.

use serde::{Deserialize, Serialize};

use super::domain::{HealthCondition, HealthcareAccess};
use super::eligibility::{has_access, has_condition};
use super::facts::{attributes, Subject};

const SEVERITY_BANDS: [(HealthCondition, u32); 3] = [
    (HealthCondition::Stage5Ckd, 40),
    (HealthCondition::Stage4Ckd, 30),
    (HealthCondition::Stage3Ckd, 20),
];

const INCOME_BANDS: [(i64, u32); 3] = [(15_000, 30), (25_000, 20), (35_000, 10)];

pub fn health_severity_score(subject: &Subject) -> u32 {
    SEVERITY_BANDS
        .iter()
        .find(|(condition, _)| has_condition(subject, *condition))
        .map(|(_, score)| *score)
        .unwrap_or(0)
}

/// Unrecorded or unknown income matches no band.
pub fn economic_vulnerability_score(subject: &Subject) -> u32 {
    let Some(income) = subject.number(attributes::INCOME) else {
        return 0;
    };

    INCOME_BANDS
        .iter()
        .find(|(ceiling, _)| income <= *ceiling)
        .map(|(_, score)| *score)
        .unwrap_or(0)
}

/// Presence of dependants only; the counts themselves do not scale the score.
pub fn dependency_score(subject: &Subject) -> u32 {
    let children = subject.number(attributes::DEPENDENT_CHILDREN).unwrap_or(0);
    let elderly = subject.number(attributes::ELDERLY_DEPENDENTS).unwrap_or(0);

    let child_score = if children > 0 { 10 } else { 0 };
    let elder_score = if elderly > 0 { 10 } else { 0 };
    child_score + elder_score
}

pub fn accessibility_score(subject: &Subject) -> u32 {
    if has_access(subject, HealthcareAccess::No) {
        10
    } else {
        5
    }
}

/// The four sub-scores and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub health_severity: u32,
    pub economic_vulnerability: u32,
    pub dependency: u32,
    pub accessibility: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn for_subject(subject: &Subject) -> Self {
        let health_severity = health_severity_score(subject);
        let economic_vulnerability = economic_vulnerability_score(subject);
        let dependency = dependency_score(subject);
        let accessibility = accessibility_score(subject);

        Self {
            health_severity,
            economic_vulnerability,
            dependency,
            accessibility,
            total: health_severity + economic_vulnerability + dependency + accessibility,
        }
    }
}

pub fn total_aid_match_score(subject: &Subject) -> u32 {
    ScoreBreakdown::for_subject(subject).total
}

/// Priority arithmetic. Every condition other than stage 5 takes the 40-point stage
/// factor, stage 3 and comorbidities included. Dependants scale with their counts here.
///
/// Income is required; `None` when it was not recorded or is unknown.
pub fn priority_score(subject: &Subject) -> Option<i64> {
    let income = subject.number(attributes::INCOME)?;

    let stage_factor = if has_condition(subject, HealthCondition::Stage5Ckd) {
        60
    } else {
        40
    };
    let income_factor = (30 - income.div_euclid(1000)).max(0);
    let children = subject.number(attributes::DEPENDENT_CHILDREN).unwrap_or(0);
    let elderly = subject.number(attributes::ELDERLY_DEPENDENTS).unwrap_or(0);
    let dependency_factor = children
        .saturating_mul(10)
        .saturating_add(elderly.saturating_mul(15));
    let access_penalty = if has_access(subject, HealthcareAccess::No) {
        20
    } else {
        0
    };

    Some(
        (100 - stage_factor - income_factor)
            .saturating_add(dependency_factor)
            .saturating_sub(access_penalty),
    )
}
