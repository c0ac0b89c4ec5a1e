use super::domain::{HealthCondition, HealthcareAccess};
use super::facts::{attributes, AttributeValue, Subject, UNKNOWN};

/// Malformed input records. Well-formed records never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("subject identifier must not be empty")]
    EmptySubjectId,
    #[error("{attribute} must not be negative (found {value})")]
    NegativeValue { attribute: String, value: i64 },
    #[error("{attribute} must be a whole number or `unknown` (found `{value}`)")]
    NotANumber { attribute: String, value: String },
    #[error("unrecognized health condition `{value}`")]
    UnrecognizedHealthCondition { value: String },
    #[error("access_to_healthcare must be yes, no or unknown (found `{value}`)")]
    UnrecognizedAccessValue { value: String },
    #[error("{attribute} holds {count} conflicting values; only one is allowed")]
    ConflictingValues { attribute: String, count: usize },
}

/// Gatekeeper run before any rule sees a subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectValidator;

impl SubjectValidator {
    pub fn validate(&self, subject: &Subject) -> Result<(), ValidationError> {
        if subject.id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptySubjectId);
        }

        for (name, values) in &subject.attributes {
            if values.len() > 1 && !attributes::is_multi_valued(name) {
                return Err(ValidationError::ConflictingValues {
                    attribute: name.clone(),
                    count: values.len(),
                });
            }
        }

        for name in attributes::COUNTS {
            for value in subject.get(name).unwrap_or_default() {
                check_count(name, value)?;
            }
        }

        for value in subject
            .get(attributes::HEALTH_CONDITION)
            .unwrap_or_default()
        {
            let recognised = value
                .as_term()
                .and_then(HealthCondition::from_term)
                .is_some();
            if !recognised {
                return Err(ValidationError::UnrecognizedHealthCondition {
                    value: value.to_string(),
                });
            }
        }

        for value in subject
            .get(attributes::ACCESS_TO_HEALTHCARE)
            .unwrap_or_default()
        {
            let recognised = value
                .as_term()
                .and_then(HealthcareAccess::from_term)
                .is_some();
            if !recognised {
                return Err(ValidationError::UnrecognizedAccessValue {
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_count(name: &str, value: &AttributeValue) -> Result<(), ValidationError> {
    match value {
        AttributeValue::Number(number) if *number < 0 => Err(ValidationError::NegativeValue {
            attribute: name.to_string(),
            value: *number,
        }),
        AttributeValue::Number(_) => Ok(()),
        AttributeValue::Term(term) if term == UNKNOWN => Ok(()),
        AttributeValue::Term(term) => Err(ValidationError::NotANumber {
            attribute: name.to_string(),
            value: term.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::facts::attributes::*;

    #[test]
    fn rejects_negative_income() {
        let subject = Subject::new("x").with(INCOME, -500);

        let error = SubjectValidator.validate(&subject).expect_err("negative income");
        assert_eq!(
            error,
            ValidationError::NegativeValue {
                attribute: INCOME.to_string(),
                value: -500
            }
        );
    }

    #[test]
    fn accepts_unknown_markers() {
        let subject = Subject::new("x")
            .with(INCOME, UNKNOWN)
            .with(HEALTH_CONDITION, UNKNOWN)
            .with(ACCESS_TO_HEALTHCARE, UNKNOWN);

        assert!(SubjectValidator.validate(&subject).is_ok());
    }

    #[test]
    fn rejects_unrecognised_enumerations() {
        let condition = Subject::new("x").with(HEALTH_CONDITION, "stage_7_ckd");
        let access = Subject::new("y").with(ACCESS_TO_HEALTHCARE, "sometimes");

        assert!(matches!(
            SubjectValidator.validate(&condition),
            Err(ValidationError::UnrecognizedHealthCondition { .. })
        ));
        assert!(matches!(
            SubjectValidator.validate(&access),
            Err(ValidationError::UnrecognizedAccessValue { .. })
        ));
    }

    #[test]
    fn rejects_text_in_numeric_attribute() {
        let subject = Subject::new("x").with(AGE, "forty");

        assert!(matches!(
            SubjectValidator.validate(&subject),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn rejects_conflicting_single_values() {
        let mut subject = Subject::new("x");
        subject.attributes.insert(
            INCOME.to_string(),
            vec![AttributeValue::Number(12000), AttributeValue::Number(40000)],
        );

        assert!(matches!(
            SubjectValidator.validate(&subject),
            Err(ValidationError::ConflictingValues { count: 2, .. })
        ));
    }

    #[test]
    fn rejects_blank_identifier() {
        assert_eq!(
            SubjectValidator.validate(&Subject::new("  ")),
            Err(ValidationError::EmptySubjectId)
        );
    }
}
