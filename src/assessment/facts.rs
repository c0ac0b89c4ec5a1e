//! Subject records and the attribute lookups every rule is written against.
//!
//! Lookups never invent values: an attribute that was not recorded comes back as `None`
//! and each rule decides for itself what that means.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Attribute names shared by the rule set and the validator.
pub mod attributes {
    pub const INCOME: &str = "income";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const MARITAL_STATUS: &str = "marital_status";
    pub const PROFESSION: &str = "profession";
    pub const LOCATION: &str = "location";
    pub const EDUCATION: &str = "education";
    pub const FAMILY_STRUCTURE: &str = "family_structure";
    pub const HEALTH_CONDITION: &str = "health_condition";
    pub const CHRONIC_CONDITION: &str = "chronic_condition";
    pub const ACCESS_TO_HEALTHCARE: &str = "access_to_healthcare";
    pub const CHILDREN: &str = "children";
    pub const DEPENDENT_CHILDREN: &str = "dependent_children";
    pub const ELDERLY_DEPENDENTS: &str = "elderly_dependents";
    pub const INCOME_CERTIFICATE: &str = "income_certificate";
    pub const MEDICAL_REPORT: &str = "medical_report";

    /// Attributes that may legitimately hold several values at once.
    pub const MULTI_VALUED: &[&str] = &[HEALTH_CONDITION];

    /// Attributes whose values must be non-negative integers (or `unknown`).
    pub const COUNTS: &[&str] = &[INCOME, AGE, CHILDREN, DEPENDENT_CHILDREN, ELDERLY_DEPENDENTS];

    pub fn is_multi_valued(name: &str) -> bool {
        MULTI_VALUED.contains(&name)
    }
}

/// Explicit marker for "recorded, but the value is not known".
pub const UNKNOWN: &str = "unknown";

/// Identifier wrapper for an evaluated person.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Identifier as the fact loader stores it: trimmed, lower-cased, spaces as underscores.
    pub fn normalized(raw: &str) -> Self {
        Self(normalize_term(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single recorded value: either an integer or a normalised term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(i64),
    Term(String),
}

impl AttributeValue {
    /// Parse a raw textual value the way the ingestion layer records it.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(number) => AttributeValue::Number(number),
            Err(_) => AttributeValue::term(trimmed),
        }
    }

    /// Build a term, lower-casing it and replacing inner whitespace with underscores.
    pub fn term(raw: &str) -> Self {
        AttributeValue::Term(normalize_term(raw))
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            AttributeValue::Number(value) => Some(*value),
            AttributeValue::Term(_) => None,
        }
    }

    pub fn as_term(&self) -> Option<&str> {
        match self {
            AttributeValue::Term(value) => Some(value),
            AttributeValue::Number(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.as_term() == Some(UNKNOWN)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(value) => write!(f, "{value}"),
            AttributeValue::Term(value) => f.write_str(value),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::term(value)
    }
}

pub(crate) fn normalize_term(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// A person record: identifier plus attribute name → recorded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attributes: BTreeMap<String, Vec<AttributeValue>>,
}

impl Subject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: SubjectId::new(id),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by fixtures and ingestion.
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.record(name, value.into());
        self
    }

    /// Record a value. Multi-valued attributes accumulate distinct values; single-valued
    /// attributes keep only the latest one.
    pub fn record(&mut self, name: &str, value: AttributeValue) -> Option<AttributeValue> {
        let values = self.attributes.entry(name.to_string()).or_default();
        if attributes::is_multi_valued(name) {
            if !values.contains(&value) {
                values.push(value);
            }
            return None;
        }

        let previous = values.pop();
        values.clear();
        values.push(value);
        previous
    }

    /// All values recorded for `name`, or `None` when the attribute is absent.
    pub fn get(&self, name: &str) -> Option<&[AttributeValue]> {
        self.attributes
            .get(name)
            .map(Vec::as_slice)
            .filter(|values| !values.is_empty())
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set membership test against the recorded values of `name`.
    pub fn has(&self, name: &str, term: &str) -> bool {
        self.get(name)
            .map(|values| values.iter().any(|value| value.as_term() == Some(term)))
            .unwrap_or(false)
    }

    /// First integer value of `name`. `unknown` and absence both yield `None`.
    pub fn number(&self, name: &str) -> Option<i64> {
        self.get(name)
            .and_then(|values| values.iter().find_map(AttributeValue::as_number))
    }

    /// First term value of `name`.
    pub fn term(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.iter().find_map(AttributeValue::as_term))
    }

    /// Present with an explicit `unknown` value.
    pub fn is_unknown(&self, name: &str) -> bool {
        self.get(name)
            .map(|values| values.iter().any(AttributeValue::is_unknown))
            .unwrap_or(false)
    }

    /// Present and carrying a usable value.
    pub fn is_known(&self, name: &str) -> bool {
        self.is_present(name) && !self.is_unknown(name)
    }
}

/// Attributes received without an identifier, such as a request body keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap(pub BTreeMap<String, Vec<AttributeValue>>);

impl AttributeMap {
    pub fn into_subject(self, id: SubjectId) -> Subject {
        Subject {
            id,
            attributes: self.0,
        }
    }
}

impl<'de> Deserialize<'de> for AttributeMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_attributes(deserializer).map(AttributeMap)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(AttributeValue),
    Many(Vec<AttributeValue>),
}

/// Accepts `"income": 12000` as well as `"health_condition": ["stage_3_ckd", "diabetes"]`
/// and normalises every term on the way in. Lists under single-valued attributes are kept
/// whole so validation can reject them.
fn deserialize_attributes<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Vec<AttributeValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
    let mut subject = Subject::new("");
    for (name, values) in raw {
        let name = normalize_term(&name);
        let values = match values {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        };
        let values = values.into_iter().map(|value| match value {
            AttributeValue::Term(term) => AttributeValue::term(&term),
            number => number,
        });
        if attributes::is_multi_valued(&name) {
            for value in values {
                subject.record(&name, value);
            }
        } else {
            subject.attributes.entry(name).or_default().extend(values);
        }
    }
    Ok(subject.attributes)
}
