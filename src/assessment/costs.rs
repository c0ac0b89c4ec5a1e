use serde::{Deserialize, Serialize};

use super::domain::HealthCondition;
use super::eligibility::has_condition;
use super::facts::{attributes, Subject};

pub const DIALYSIS_SESSIONS_PER_WEEK: u64 = 3;
pub const DIALYSIS_SESSION_COST: u64 = 5_000;
pub const TRANSPORT_COST_PER_DEPENDANT: u64 = 800;
pub const CAREGIVING_COST_PER_DEPENDANT: u64 = 2_000;
pub const NUTRITIONAL_SUPPORT: u64 = 3_000;

/// Dialysis cost in LKR. Only defined for stage 5; `None` means not applicable.
pub fn dialysis_cost(subject: &Subject) -> Option<u64> {
    has_condition(subject, HealthCondition::Stage5Ckd)
        .then_some(DIALYSIS_SESSIONS_PER_WEEK * DIALYSIS_SESSION_COST)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndirectCost {
    pub transportation: u64,
    pub caregiving: u64,
}

/// Transport and caregiving costs. Unrecorded dependant counts contribute nothing; amounts
/// saturate at `u64::MAX` rather than wrap.
pub fn indirect_cost(subject: &Subject) -> IndirectCost {
    let children = dependant_count(subject, attributes::DEPENDENT_CHILDREN);
    let elderly = dependant_count(subject, attributes::ELDERLY_DEPENDENTS);
    let dependants = children.saturating_add(elderly);

    IndirectCost {
        transportation: dependants.saturating_mul(TRANSPORT_COST_PER_DEPENDANT),
        caregiving: dependants.saturating_mul(CAREGIVING_COST_PER_DEPENDANT),
    }
}

fn dependant_count(subject: &Subject, name: &str) -> u64 {
    subject
        .number(name)
        .and_then(|count| u64::try_from(count).ok())
        .unwrap_or(0)
}

/// Total recommended aid: dialysis (0 when not applicable), indirect costs, nutrition.
pub fn recommended_aid(subject: &Subject) -> u64 {
    let indirect = indirect_cost(subject);
    dialysis_cost(subject)
        .unwrap_or(0)
        .saturating_add(indirect.transportation)
        .saturating_add(indirect.caregiving)
        .saturating_add(NUTRITIONAL_SUPPORT)
}
