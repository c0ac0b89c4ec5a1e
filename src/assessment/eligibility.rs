//! Boolean eligibility rules.
//!
//! Every rule states its own policy for attributes that were never recorded. Core aid
//! eligibility treats a missing income or healthcare-access fact as blocking; the named
//! program predicates simply do not hold when an attribute they test is absent.

use super::catalog::{lives_in_rural_area, ProgramId};
use super::domain::{HealthCondition, HealthcareAccess};
use super::facts::{attributes, Subject};

pub(crate) const AID_INCOME_CEILING: i64 = 30_000;

/// Income certificate on file and a recent medical report. Anything else fails closed.
pub fn document_check(subject: &Subject) -> bool {
    subject.term(attributes::INCOME_CERTIFICATE) == Some("yes")
        && subject.term(attributes::MEDICAL_REPORT) == Some("recent")
}

/// Required facts are recorded with usable values and documents check out.
pub fn has_all_required_data(subject: &Subject) -> bool {
    let income_recorded = matches!(subject.number(attributes::INCOME), Some(income) if income != 0);

    income_recorded
        && subject.is_known(attributes::HEALTH_CONDITION)
        && subject.is_known(attributes::ACCESS_TO_HEALTHCARE)
        && document_check(subject)
}

/// Income or healthcare access was never recorded at all.
pub fn missing_critical_data(subject: &Subject) -> bool {
    !subject.is_present(attributes::INCOME) || !subject.is_present(attributes::ACCESS_TO_HEALTHCARE)
}

/// Main financial-aid decision.
pub fn eligible_for_aid(subject: &Subject) -> bool {
    if missing_critical_data(subject) || !has_all_required_data(subject) {
        return false;
    }

    let income_within = matches!(
        subject.number(attributes::INCOME),
        Some(income) if income > 0 && income <= AID_INCOME_CEILING
    );

    income_within
        && has_advanced_ckd(subject)
        && has_access(subject, HealthcareAccess::No)
        && document_check(subject)
}

pub(crate) fn has_condition(subject: &Subject, condition: HealthCondition) -> bool {
    subject.has(attributes::HEALTH_CONDITION, condition.term())
}

pub(crate) fn has_advanced_ckd(subject: &Subject) -> bool {
    has_condition(subject, HealthCondition::Stage4Ckd)
        || has_condition(subject, HealthCondition::Stage5Ckd)
}

pub(crate) fn has_access(subject: &Subject, access: HealthcareAccess) -> bool {
    subject.has(attributes::ACCESS_TO_HEALTHCARE, access.term())
}

pub(crate) fn income_below(subject: &Subject, limit: i64) -> bool {
    matches!(subject.number(attributes::INCOME), Some(income) if income < limit)
}

pub(crate) fn age_above(subject: &Subject, limit: i64) -> bool {
    matches!(subject.number(attributes::AGE), Some(age) if age > limit)
}

pub(crate) fn has_dependent_children(subject: &Subject) -> bool {
    matches!(subject.number(attributes::DEPENDENT_CHILDREN), Some(count) if count > 0)
}

/// One condition of a named program, with the wording used when it is not met.
pub struct Criterion {
    pub attribute: &'static str,
    pub met: fn(&Subject) -> bool,
    pub unmet: &'static str,
}

const SUWA_CKD_AID: &[Criterion] = &[
    Criterion {
        attribute: attributes::AGE,
        met: |s| age_above(s, 40),
        unmet: "age is 40 or below",
    },
    Criterion {
        attribute: attributes::HEALTH_CONDITION,
        met: has_advanced_ckd,
        unmet: "CKD stage is not 4 or 5",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 25_000),
        unmet: "monthly income is LKR 25,000 or more",
    },
];

const DIRIYA_SUPPORT: &[Criterion] = &[
    Criterion {
        attribute: attributes::MARITAL_STATUS,
        met: |s| s.has(attributes::MARITAL_STATUS, "single"),
        unmet: "not a single parent",
    },
    Criterion {
        attribute: attributes::DEPENDENT_CHILDREN,
        met: has_dependent_children,
        unmet: "no dependent children",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 20_000),
        unmet: "monthly income is LKR 20,000 or more",
    },
];

const THURUNU_PIYASA: &[Criterion] = &[
    Criterion {
        attribute: attributes::LOCATION,
        met: lives_in_rural_area,
        unmet: "not in a rural area",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 15_000),
        unmet: "monthly income is LKR 15,000 or more",
    },
];

const SAHANA_HEALTHCARE: &[Criterion] = &[
    Criterion {
        attribute: attributes::CHRONIC_CONDITION,
        met: |s| s.has(attributes::CHRONIC_CONDITION, "yes"),
        unmet: "no chronic condition",
    },
    Criterion {
        attribute: attributes::ACCESS_TO_HEALTHCARE,
        met: |s| has_access(s, HealthcareAccess::No),
        unmet: "already has healthcare access",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 20_000),
        unmet: "monthly income is LKR 20,000 or more",
    },
];

const DIVISAVIYA_INCOME_SUPPORT: &[Criterion] = &[
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 15_000),
        unmet: "monthly income is LKR 15,000 or more",
    },
    Criterion {
        attribute: attributes::FAMILY_STRUCTURE,
        met: |s| s.has(attributes::FAMILY_STRUCTURE, "nuclear"),
        unmet: "family structure is not nuclear",
    },
];

const NIRMALA_EMPOWERMENT: &[Criterion] = &[
    Criterion {
        attribute: attributes::GENDER,
        met: |s| s.has(attributes::GENDER, "female"),
        unmet: "not female",
    },
    Criterion {
        attribute: attributes::MARITAL_STATUS,
        met: |s| s.has(attributes::MARITAL_STATUS, "single"),
        unmet: "not single",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 18_000),
        unmet: "monthly income is LKR 18,000 or more",
    },
];

const DARUWAN_SURAKSHA: &[Criterion] = &[
    Criterion {
        attribute: attributes::DEPENDENT_CHILDREN,
        met: has_dependent_children,
        unmet: "no dependent children",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 20_000),
        unmet: "monthly income is LKR 20,000 or more",
    },
];

const GOVI_JANA_SUPPORT: &[Criterion] = &[
    Criterion {
        attribute: attributes::PROFESSION,
        met: |s| s.has(attributes::PROFESSION, "part_time_tea_plucker"),
        unmet: "not a part-time tea plucker",
    },
    Criterion {
        attribute: attributes::LOCATION,
        met: lives_in_rural_area,
        unmet: "not in a rural area",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 18_000),
        unmet: "monthly income is LKR 18,000 or more",
    },
];

const AROGYA_ELDERLY_CARE: &[Criterion] = &[
    Criterion {
        attribute: attributes::AGE,
        met: |s| age_above(s, 60),
        unmet: "age is 60 or below",
    },
    Criterion {
        attribute: attributes::INCOME,
        met: |s| income_below(s, 20_000),
        unmet: "monthly income is LKR 20,000 or more",
    },
];

/// One named program and the criteria that must all hold for it.
#[derive(Clone, Copy)]
pub struct ProgramRule {
    pub program: ProgramId,
    pub criteria: &'static [Criterion],
}

impl ProgramRule {
    pub fn holds(&self, subject: &Subject) -> bool {
        self.criteria.iter().all(|criterion| (criterion.met)(subject))
    }

    pub fn unmet_criteria<'a>(
        &'a self,
        subject: &'a Subject,
    ) -> impl Iterator<Item = &'static Criterion> + 'a {
        self.criteria
            .iter()
            .filter(move |criterion| !(criterion.met)(subject))
    }
}

/// Named program rules in declaration order.
pub const PROGRAM_RULES: [ProgramRule; 9] = [
    ProgramRule {
        program: ProgramId::SuwaCkdAid,
        criteria: SUWA_CKD_AID,
    },
    ProgramRule {
        program: ProgramId::DiriyaSupport,
        criteria: DIRIYA_SUPPORT,
    },
    ProgramRule {
        program: ProgramId::ThurunuPiyasa,
        criteria: THURUNU_PIYASA,
    },
    ProgramRule {
        program: ProgramId::SahanaHealthcare,
        criteria: SAHANA_HEALTHCARE,
    },
    ProgramRule {
        program: ProgramId::DivisaviyaIncomeSupport,
        criteria: DIVISAVIYA_INCOME_SUPPORT,
    },
    ProgramRule {
        program: ProgramId::NirmalaEmpowerment,
        criteria: NIRMALA_EMPOWERMENT,
    },
    ProgramRule {
        program: ProgramId::DaruwanSuraksha,
        criteria: DARUWAN_SURAKSHA,
    },
    ProgramRule {
        program: ProgramId::GoviJanaSupport,
        criteria: GOVI_JANA_SUPPORT,
    },
    ProgramRule {
        program: ProgramId::ArogyaElderlyCare,
        criteria: AROGYA_ELDERLY_CARE,
    },
];

/// Evaluate a single named program. Programs without a predicate never hold.
pub fn is_eligible_for(subject: &Subject, program: ProgramId) -> bool {
    PROGRAM_RULES
        .iter()
        .find(|rule| rule.program == program)
        .map(|rule| rule.holds(subject))
        .unwrap_or(false)
}

/// Every named program whose predicate holds, in declaration order.
pub fn eligible_programs(subject: &Subject) -> Vec<ProgramId> {
    PROGRAM_RULES
        .iter()
        .filter(|rule| rule.holds(subject))
        .map(|rule| rule.program)
        .collect()
}
