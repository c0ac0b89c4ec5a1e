use serde::{Deserialize, Serialize};

/// Recognised values of the multi-valued `health_condition` attribute.
///
/// CKD stages are ordered by severity; comorbidities sit outside the staged scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    #[serde(rename = "stage_1_ckd")]
    Stage1Ckd,
    #[serde(rename = "stage_2_ckd")]
    Stage2Ckd,
    #[serde(rename = "stage_3_ckd")]
    Stage3Ckd,
    #[serde(rename = "stage_4_ckd")]
    Stage4Ckd,
    #[serde(rename = "stage_5_ckd")]
    Stage5Ckd,
    Hypertension,
    Diabetes,
    HeartDisease,
    Anemia,
    Obesity,
    Unknown,
}

impl HealthCondition {
    pub const ALL: [HealthCondition; 11] = [
        HealthCondition::Stage1Ckd,
        HealthCondition::Stage2Ckd,
        HealthCondition::Stage3Ckd,
        HealthCondition::Stage4Ckd,
        HealthCondition::Stage5Ckd,
        HealthCondition::Hypertension,
        HealthCondition::Diabetes,
        HealthCondition::HeartDisease,
        HealthCondition::Anemia,
        HealthCondition::Obesity,
        HealthCondition::Unknown,
    ];

    pub const fn term(self) -> &'static str {
        match self {
            HealthCondition::Stage1Ckd => "stage_1_ckd",
            HealthCondition::Stage2Ckd => "stage_2_ckd",
            HealthCondition::Stage3Ckd => "stage_3_ckd",
            HealthCondition::Stage4Ckd => "stage_4_ckd",
            HealthCondition::Stage5Ckd => "stage_5_ckd",
            HealthCondition::Hypertension => "hypertension",
            HealthCondition::Diabetes => "diabetes",
            HealthCondition::HeartDisease => "heart_disease",
            HealthCondition::Anemia => "anemia",
            HealthCondition::Obesity => "obesity",
            HealthCondition::Unknown => "unknown",
        }
    }

    pub fn from_term(term: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|condition| condition.term() == term)
    }

    /// CKD stage number, `None` for comorbidities.
    pub const fn stage(self) -> Option<u8> {
        match self {
            HealthCondition::Stage1Ckd => Some(1),
            HealthCondition::Stage2Ckd => Some(2),
            HealthCondition::Stage3Ckd => Some(3),
            HealthCondition::Stage4Ckd => Some(4),
            HealthCondition::Stage5Ckd => Some(5),
            _ => None,
        }
    }
}

/// Recognised values of `access_to_healthcare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthcareAccess {
    Yes,
    No,
    Unknown,
}

impl HealthcareAccess {
    pub const fn term(self) -> &'static str {
        match self {
            HealthcareAccess::Yes => "yes",
            HealthcareAccess::No => "no",
            HealthcareAccess::Unknown => "unknown",
        }
    }

    pub fn from_term(term: &str) -> Option<Self> {
        match term {
            "yes" => Some(HealthcareAccess::Yes),
            "no" => Some(HealthcareAccess::No),
            "unknown" => Some(HealthcareAccess::Unknown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_terms_round_trip_through_lookup() {
        for condition in HealthCondition::ALL {
            assert_eq!(HealthCondition::from_term(condition.term()), Some(condition));
        }
        assert_eq!(HealthCondition::from_term("stage_6_ckd"), None);
    }

    #[test]
    fn comorbidities_have_no_stage() {
        assert_eq!(HealthCondition::Stage4Ckd.stage(), Some(4));
        assert_eq!(HealthCondition::Hypertension.stage(), None);
        assert_eq!(HealthCondition::Unknown.stage(), None);
    }
}
