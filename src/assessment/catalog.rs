//! Static program catalog and the rural-area list backing location rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::facts::{attributes, Subject};

/// Every program the engine can name, either as a predicate outcome or a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramId {
    ProgramA,
    ProgramB,
    SuwaCkdAid,
    DiriyaSupport,
    ThurunuPiyasa,
    SahanaHealthcare,
    DivisaviyaIncomeSupport,
    NirmalaEmpowerment,
    DaruwanSuraksha,
    GoviJanaSupport,
    ArogyaElderlyCare,
    ComprehensiveChronicCare,
    EmergencyMedicalSupport,
    RuralHealthcareAccess,
    DependentCareSupport,
    ProfessionalRehabilitation,
}

impl ProgramId {
    pub const fn id(self) -> &'static str {
        match self {
            ProgramId::ProgramA => "program_a",
            ProgramId::ProgramB => "program_b",
            ProgramId::SuwaCkdAid => "suwa_ckd_aid",
            ProgramId::DiriyaSupport => "diriya_support",
            ProgramId::ThurunuPiyasa => "thurunu_piyasa",
            ProgramId::SahanaHealthcare => "sahana_healthcare",
            ProgramId::DivisaviyaIncomeSupport => "divisaviya_income_support",
            ProgramId::NirmalaEmpowerment => "nirmala_empowerment",
            ProgramId::DaruwanSuraksha => "daruwan_suraksha",
            ProgramId::GoviJanaSupport => "govi_jana_support",
            ProgramId::ArogyaElderlyCare => "arogya_elderly_care",
            ProgramId::ComprehensiveChronicCare => "comprehensive_chronic_care",
            ProgramId::EmergencyMedicalSupport => "emergency_medical_support",
            ProgramId::RuralHealthcareAccess => "rural_healthcare_access",
            ProgramId::DependentCareSupport => "dependent_care_support",
            ProgramId::ProfessionalRehabilitation => "professional_rehabilitation",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ProgramId::ProgramA => "Program A",
            ProgramId::ProgramB => "Program B",
            ProgramId::SuwaCkdAid => "Suwa CKD Aid",
            ProgramId::DiriyaSupport => "Diriya Support",
            ProgramId::ThurunuPiyasa => "Thurunu Piyasa",
            ProgramId::SahanaHealthcare => "Sahana Healthcare",
            ProgramId::DivisaviyaIncomeSupport => "Divisaviya Income Support",
            ProgramId::NirmalaEmpowerment => "Nirmala Empowerment",
            ProgramId::DaruwanSuraksha => "Daruwan Suraksha",
            ProgramId::GoviJanaSupport => "Govi Jana Support",
            ProgramId::ArogyaElderlyCare => "Arogya Elderly Care",
            ProgramId::ComprehensiveChronicCare => "Comprehensive Chronic Care Program",
            ProgramId::EmergencyMedicalSupport => "Emergency Medical Support Program",
            ProgramId::RuralHealthcareAccess => "Rural Healthcare Access Program",
            ProgramId::DependentCareSupport => "Dependent Care Support Program",
            ProgramId::ProfessionalRehabilitation => "Professional Rehabilitation Program",
        }
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_months: Option<u8>,
}

const fn entry(id: ProgramId, description: &'static str, renewal_months: Option<u8>) -> Program {
    Program {
        id,
        name: id.name(),
        description,
        renewal_months,
    }
}

static STANDARD_PROGRAMS: [Program; 16] = [
    entry(
        ProgramId::ProgramA,
        "LKR 20,000 monthly for dialysis-related expenses",
        Some(6),
    ),
    entry(
        ProgramId::ProgramB,
        "LKR 15,000 monthly for transport and caregiving",
        Some(12),
    ),
    entry(
        ProgramId::SuwaCkdAid,
        "Treatment support for adults over 40 with stage 4 or 5 CKD on low incomes",
        None,
    ),
    entry(
        ProgramId::DiriyaSupport,
        "Household support for single parents with dependent children",
        None,
    ),
    entry(
        ProgramId::ThurunuPiyasa,
        "Housing and livelihood support for low-income rural families",
        None,
    ),
    entry(
        ProgramId::SahanaHealthcare,
        "Healthcare access for people with chronic conditions and no current care",
        None,
    ),
    entry(
        ProgramId::DivisaviyaIncomeSupport,
        "Income supplement for low-income nuclear families",
        None,
    ),
    entry(
        ProgramId::NirmalaEmpowerment,
        "Livelihood and skills support for single women",
        None,
    ),
    entry(
        ProgramId::DaruwanSuraksha,
        "Education and welfare support for households with dependent children",
        None,
    ),
    entry(
        ProgramId::GoviJanaSupport,
        "Income support for rural part-time tea pluckers",
        None,
    ),
    entry(
        ProgramId::ArogyaElderlyCare,
        "Care and medical support for low-income people over 60",
        None,
    ),
    entry(
        ProgramId::ComprehensiveChronicCare,
        "Full coverage of dialysis and chronic care for stage 5 patients on very low incomes",
        None,
    ),
    entry(
        ProgramId::EmergencyMedicalSupport,
        "Immediate medical support for patients without access to healthcare",
        None,
    ),
    entry(
        ProgramId::RuralHealthcareAccess,
        "Clinic access and transport for stage 3 patients in rural districts",
        None,
    ),
    entry(
        ProgramId::DependentCareSupport,
        "Caregiving support for patients with dependent children",
        None,
    ),
    entry(
        ProgramId::ProfessionalRehabilitation,
        "Rehabilitation and income replacement for farmers, fishermen and laborers",
        None,
    ),
];

/// Read-only lookup of program metadata.
#[derive(Debug, Clone)]
pub struct ProgramCatalog {
    programs: &'static [Program],
}

impl ProgramCatalog {
    pub fn standard() -> Self {
        Self {
            programs: &STANDARD_PROGRAMS,
        }
    }

    pub fn get(&self, id: ProgramId) -> Option<&Program> {
        self.programs.iter().find(|program| program.id == id)
    }

    pub fn programs(&self) -> &[Program] {
        self.programs
    }
}

impl Default for ProgramCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Districts treated as rural for location-based rules.
pub const RURAL_AREAS: &[&str] = &[
    "anuradhapura",
    "polonnaruwa",
    "monaragala",
    "badulla",
    "ampara",
    "vavuniya",
    "mullaitivu",
    "kilinochchi",
    "mannar",
    "trincomalee",
    "batticaloa",
    "hambantota",
    "kurunegala",
    "puttalam",
    "nuwara_eliya",
    "ratnapura",
    "kegalle",
    "matale",
    "rural",
];

pub fn is_rural_area(location: &str) -> bool {
    RURAL_AREAS.contains(&location)
}

/// True when any recorded location is in the rural list. Absent location is not rural.
pub fn lives_in_rural_area(subject: &Subject) -> bool {
    subject
        .get(attributes::LOCATION)
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_term())
                .any(is_rural_area)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_each_program_once() {
        let catalog = ProgramCatalog::standard();
        let mut ids: Vec<_> = catalog.programs().iter().map(|program| program.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.programs().len());
    }

    #[test]
    fn program_a_and_b_carry_renewal_intervals() {
        let catalog = ProgramCatalog::standard();
        let program_a = catalog.get(ProgramId::ProgramA).expect("program a listed");
        let program_b = catalog.get(ProgramId::ProgramB).expect("program b listed");

        assert_eq!(program_a.renewal_months, Some(6));
        assert!(program_a.description.contains("20,000"));
        assert_eq!(program_b.renewal_months, Some(12));
        assert_eq!(
            catalog
                .get(ProgramId::SuwaCkdAid)
                .and_then(|program| program.renewal_months),
            None
        );
    }

    #[test]
    fn rural_lookup_uses_normalised_location() {
        let rural = Subject::new("a").with(attributes::LOCATION, "Nuwara Eliya");
        let urban = Subject::new("b").with(attributes::LOCATION, "Colombo");
        let unrecorded = Subject::new("c");

        assert!(lives_in_rural_area(&rural));
        assert!(!lives_in_rural_area(&urban));
        assert!(!lives_in_rural_area(&unrecorded));
    }
}
