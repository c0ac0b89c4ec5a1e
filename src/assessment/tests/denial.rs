use super::common::*;
use crate::assessment::facts::attributes::*;
use crate::assessment::eligibility::PROGRAM_RULES;
use crate::assessment::{
    denial_reasons, eligible_programs, program_gaps, DenialReason, EvaluationEngine, ProgramId,
    Subject, UNKNOWN,
};

#[test]
fn eligible_subjects_have_no_denial_reasons() {
    assert!(denial_reasons(&eligible_subject()).is_empty());
}

#[test]
fn reasons_are_reported_in_order() {
    let subject = Subject::new("x")
        .with(INCOME, 45000)
        .with(HEALTH_CONDITION, "stage_3_ckd")
        .with(ACCESS_TO_HEALTHCARE, "yes");

    assert_eq!(
        denial_reasons(&subject),
        vec![
            DenialReason::IncomeAboveCeiling {
                income: 45000,
                ceiling: 30000,
            },
            DenialReason::IneligibleCondition {
                conditions: vec!["stage_3_ckd".to_string()],
            },
            DenialReason::HasHealthcareAccess,
            DenialReason::IncompleteDocumentation,
        ]
    );
}

#[test]
fn empty_records_list_each_missing_attribute() {
    assert_eq!(
        denial_reasons(&Subject::new("blank")),
        vec![
            DenialReason::IncompleteDocumentation,
            DenialReason::MissingData {
                attribute: INCOME.to_string()
            },
            DenialReason::MissingData {
                attribute: HEALTH_CONDITION.to_string()
            },
            DenialReason::MissingData {
                attribute: ACCESS_TO_HEALTHCARE.to_string()
            },
        ]
    );
}

#[test]
fn zero_and_unknown_values_get_their_own_reasons() {
    let subject = eligible_subject()
        .with(INCOME, 0)
        .with(HEALTH_CONDITION, UNKNOWN);

    let reasons = denial_reasons(&subject);

    assert_eq!(reasons.first(), Some(&DenialReason::ZeroIncome));
    assert!(reasons.contains(&DenialReason::UnknownData {
        attribute: HEALTH_CONDITION.to_string()
    }));
}

#[test]
fn program_gaps_name_unmet_criteria() {
    let subject = Subject::new("x")
        .with(AGE, 35)
        .with(HEALTH_CONDITION, "stage_4_ckd")
        .with(INCOME, 30000);

    let gaps = program_gaps(&subject);

    let suwa = gaps
        .iter()
        .find(|gap| gap.program == ProgramId::SuwaCkdAid)
        .expect("suwa gap reported");
    assert_eq!(
        suwa.unmet,
        vec![
            "age is 40 or below".to_string(),
            "monthly income is LKR 25,000 or more".to_string(),
        ]
    );

    let thurunu = gaps
        .iter()
        .find(|gap| gap.program == ProgramId::ThurunuPiyasa)
        .expect("thurunu gap reported");
    assert_eq!(
        thurunu.unmet,
        vec![
            "location not recorded".to_string(),
            "monthly income is LKR 15,000 or more".to_string(),
        ]
    );
}

#[test]
fn program_gaps_skip_programs_the_subject_qualifies_for() {
    let gaps = program_gaps(&rural_single_parent());

    assert_eq!(gaps.len(), 6);
    assert!(gaps
        .iter()
        .all(|gap| gap.program != ProgramId::DiriyaSupport && !gap.unmet.is_empty()));
}

#[test]
fn decision_summary_joins_reason_summaries() {
    let engine = EvaluationEngine::new();
    let eligible = engine.evaluate(&eligible_subject()).expect("valid subject");
    let denied = engine
        .evaluate(&eligible_subject().with(ACCESS_TO_HEALTHCARE, "yes"))
        .expect("valid subject");

    assert_eq!(eligible.decision_summary(), "eligible for financial aid");
    assert_eq!(
        denied.decision_summary(),
        "not eligible: already has access to healthcare services"
    );
}

#[test]
fn eligible_programs_and_gaps_partition_the_named_programs() {
    let subjects = [
        Subject::new("blank"),
        eligible_subject(),
        end_stage_subject(),
        rural_single_parent(),
        elderly_widow(),
        Subject::new("anura")
            .with(CHRONIC_CONDITION, "yes")
            .with(ACCESS_TO_HEALTHCARE, "no")
            .with(INCOME, 19999),
    ];

    for subject in &subjects {
        let eligible = eligible_programs(subject);
        let gaps = program_gaps(subject);

        for rule in &PROGRAM_RULES {
            let qualifies = eligible.contains(&rule.program);
            let gap = gaps.iter().find(|gap| gap.program == rule.program);
            match (qualifies, gap) {
                (true, None) => {}
                (false, Some(gap)) => assert!(
                    !gap.unmet.is_empty(),
                    "{:?} gap for {} lists no criteria",
                    rule.program,
                    subject.id
                ),
                other => panic!(
                    "{:?} for {} must be eligible or a gap, got {other:?}",
                    rule.program, subject.id
                ),
            }
        }
        assert_eq!(eligible.len() + gaps.len(), PROGRAM_RULES.len());
    }
}
