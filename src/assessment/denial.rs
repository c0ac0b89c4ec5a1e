//! Structured explanations for a negative aid decision and for each unmet program.

use serde::{Deserialize, Serialize};

use super::catalog::ProgramId;
use super::domain::HealthcareAccess;
use super::eligibility::{
    document_check, eligible_for_aid, has_access, has_advanced_ckd, AID_INCOME_CEILING,
    PROGRAM_RULES,
};
use super::facts::{attributes, Subject};

/// Reasons the main aid decision came out negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    IncomeAboveCeiling { income: i64, ceiling: i64 },
    ZeroIncome,
    IneligibleCondition { conditions: Vec<String> },
    HasHealthcareAccess,
    IncompleteDocumentation,
    MissingData { attribute: String },
    UnknownData { attribute: String },
}

impl DenialReason {
    pub fn summary(&self) -> String {
        match self {
            DenialReason::IncomeAboveCeiling { income, ceiling } => format!(
                "monthly income LKR {income} exceeds the LKR {ceiling} threshold"
            ),
            DenialReason::ZeroIncome => "monthly income recorded as zero".to_string(),
            DenialReason::IneligibleCondition { conditions } => format!(
                "CKD stage does not meet program criteria (recorded: {})",
                conditions.join(", ")
            ),
            DenialReason::HasHealthcareAccess => {
                "already has access to healthcare services".to_string()
            }
            DenialReason::IncompleteDocumentation => {
                "missing or outdated documents (income certificate or medical report)".to_string()
            }
            DenialReason::MissingData { attribute } => {
                format!("missing required data: {attribute}")
            }
            DenialReason::UnknownData { attribute } => {
                format!("required data recorded as unknown: {attribute}")
            }
        }
    }
}

const REQUIRED_ATTRIBUTES: [&str; 3] = [
    attributes::INCOME,
    attributes::HEALTH_CONDITION,
    attributes::ACCESS_TO_HEALTHCARE,
];

/// Every reason that applies, empty when the subject is eligible.
pub fn denial_reasons(subject: &Subject) -> Vec<DenialReason> {
    if eligible_for_aid(subject) {
        return Vec::new();
    }

    let mut reasons = Vec::new();

    match subject.number(attributes::INCOME) {
        Some(0) => reasons.push(DenialReason::ZeroIncome),
        Some(income) if income > AID_INCOME_CEILING => {
            reasons.push(DenialReason::IncomeAboveCeiling {
                income,
                ceiling: AID_INCOME_CEILING,
            })
        }
        _ => {}
    }

    if subject.is_known(attributes::HEALTH_CONDITION) && !has_advanced_ckd(subject) {
        let conditions = subject
            .get(attributes::HEALTH_CONDITION)
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect();
        reasons.push(DenialReason::IneligibleCondition { conditions });
    }

    if has_access(subject, HealthcareAccess::Yes) {
        reasons.push(DenialReason::HasHealthcareAccess);
    }

    if !document_check(subject) {
        reasons.push(DenialReason::IncompleteDocumentation);
    }

    for attribute in REQUIRED_ATTRIBUTES {
        if !subject.is_present(attribute) {
            reasons.push(DenialReason::MissingData {
                attribute: attribute.to_string(),
            });
        } else if subject.is_unknown(attribute) {
            reasons.push(DenialReason::UnknownData {
                attribute: attribute.to_string(),
            });
        }
    }

    reasons
}

/// A named program the subject does not qualify for, with the unmet criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramGap {
    pub program: ProgramId,
    pub unmet: Vec<String>,
}

/// Unmet criteria for every named program the subject does not qualify for.
pub fn program_gaps(subject: &Subject) -> Vec<ProgramGap> {
    PROGRAM_RULES
        .iter()
        .filter_map(|rule| {
            let unmet: Vec<String> = rule
                .unmet_criteria(subject)
                .map(|criterion| {
                    if subject.is_present(criterion.attribute) {
                        criterion.unmet.to_string()
                    } else {
                        format!("{} not recorded", criterion.attribute)
                    }
                })
                .collect();
            (!unmet.is_empty()).then_some(ProgramGap {
                program: rule.program,
                unmet,
            })
        })
        .collect()
}
