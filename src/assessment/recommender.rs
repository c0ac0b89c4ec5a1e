//! Single-program recommendation.
//!
//! Branches are checked top to bottom and the first one that applies wins. The outcome
//! does not look at scores or at the list of independently eligible programs.

use serde::{Deserialize, Serialize};

use super::catalog::{lives_in_rural_area, ProgramId};
use super::domain::{HealthCondition, HealthcareAccess};
use super::eligibility::{has_access, has_condition};
use super::facts::{attributes, Subject};

const PHYSICAL_LABOUR_PROFESSIONS: [&str; 3] = ["farmer", "fisherman", "laborer"];

/// Which cascade branch produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationBranch {
    EndStageLowIncome,
    AdvancedWithoutAccess,
    RuralModerate,
    DependentChildren,
    PhysicalLabourModerate,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub program: ProgramId,
    pub branch: RecommendationBranch,
}

struct Branch {
    tag: RecommendationBranch,
    program: ProgramId,
    applies: fn(&Subject) -> bool,
}

fn income_at_most(subject: &Subject, ceiling: i64) -> bool {
    matches!(subject.number(attributes::INCOME), Some(income) if income <= ceiling)
}

fn end_stage_low_income(subject: &Subject) -> bool {
    has_condition(subject, HealthCondition::Stage5Ckd) && income_at_most(subject, 15_000)
}

fn advanced_without_access(subject: &Subject) -> bool {
    has_condition(subject, HealthCondition::Stage4Ckd) && has_access(subject, HealthcareAccess::No)
}

fn rural_moderate(subject: &Subject) -> bool {
    lives_in_rural_area(subject) && has_condition(subject, HealthCondition::Stage3Ckd)
}

fn dependent_children(subject: &Subject) -> bool {
    matches!(subject.number(attributes::DEPENDENT_CHILDREN), Some(count) if count > 0)
        && income_at_most(subject, 30_000)
}

fn physical_labour_moderate(subject: &Subject) -> bool {
    PHYSICAL_LABOUR_PROFESSIONS
        .iter()
        .any(|profession| subject.has(attributes::PROFESSION, profession))
        && has_condition(subject, HealthCondition::Stage3Ckd)
}

const CASCADE: [Branch; 5] = [
    Branch {
        tag: RecommendationBranch::EndStageLowIncome,
        program: ProgramId::ComprehensiveChronicCare,
        applies: end_stage_low_income,
    },
    Branch {
        tag: RecommendationBranch::AdvancedWithoutAccess,
        program: ProgramId::EmergencyMedicalSupport,
        applies: advanced_without_access,
    },
    Branch {
        tag: RecommendationBranch::RuralModerate,
        program: ProgramId::RuralHealthcareAccess,
        applies: rural_moderate,
    },
    Branch {
        tag: RecommendationBranch::DependentChildren,
        program: ProgramId::DependentCareSupport,
        applies: dependent_children,
    },
    Branch {
        tag: RecommendationBranch::PhysicalLabourModerate,
        program: ProgramId::ProfessionalRehabilitation,
        applies: physical_labour_moderate,
    },
];

const FALLBACK: Recommendation = Recommendation {
    program: ProgramId::EmergencyMedicalSupport,
    branch: RecommendationBranch::Fallback,
};

/// Recommendation together with the branch that produced it.
pub fn recommend(subject: &Subject) -> Recommendation {
    CASCADE
        .iter()
        .find(|branch| (branch.applies)(subject))
        .map(|branch| Recommendation {
            program: branch.program,
            branch: branch.tag,
        })
        .unwrap_or(FALLBACK)
}

pub fn recommend_aid_program(subject: &Subject) -> ProgramId {
    recommend(subject).program
}
