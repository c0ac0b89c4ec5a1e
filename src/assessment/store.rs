use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::facts::{attributes, Subject, SubjectId};

/// How an incoming record is combined with what is already stored for the same subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Every attribute in the incoming record replaces the stored one wholesale.
    LastWriteWins,
    /// Multi-valued attributes are unioned; single-valued ones take the incoming value.
    #[default]
    Union,
}

impl MergePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "union" | "union_merge" => Some(MergePolicy::Union),
            "last_write_wins" | "lww" | "replace" => Some(MergePolicy::LastWriteWins),
            _ => None,
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::LastWriteWins => f.write_str("last_write_wins"),
            MergePolicy::Union => f.write_str("union"),
        }
    }
}

/// Subject snapshot keyed by identifier. Rules only ever read from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactStore {
    subjects: BTreeMap<SubjectId, Subject>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a subject, replacing any previous record. Returns the replaced record.
    pub fn insert(&mut self, subject: Subject) -> Option<Subject> {
        self.subjects.insert(subject.id.clone(), subject)
    }

    /// Combine `incoming` with the stored record under `policy`.
    pub fn merge(&mut self, incoming: Subject, policy: MergePolicy) -> &Subject {
        let id = incoming.id.clone();
        let stored = self
            .subjects
            .entry(id.clone())
            .or_insert_with(|| Subject::new(id.as_str()));

        for (name, values) in incoming.attributes {
            if values.is_empty() {
                continue;
            }

            if let Some(previous) = stored.get(&name) {
                if !attributes::is_multi_valued(&name) && previous != values.as_slice() {
                    warn!(
                        subject = %id,
                        attribute = %name,
                        previous = %join_values(previous),
                        incoming = %join_values(&values),
                        "conflicting value replaced"
                    );
                }
            }

            match policy {
                MergePolicy::Union if attributes::is_multi_valued(&name) => {
                    for value in values {
                        stored.record(&name, value);
                    }
                }
                _ => {
                    stored.attributes.insert(name, values);
                }
            }
        }

        stored
    }

    pub fn get(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.get(id)
    }

    pub fn contains(&self, id: &SubjectId) -> bool {
        self.subjects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Subjects in identifier order.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.values()
    }
}

fn join_values(values: &[super::facts::AttributeValue]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::facts::attributes::*;
    use crate::assessment::facts::AttributeValue;

    fn stored() -> FactStore {
        let mut store = FactStore::new();
        store.insert(
            Subject::new("nimal")
                .with(INCOME, 12000)
                .with(AGE, 52)
                .with(HEALTH_CONDITION, "stage_3_ckd"),
        );
        store
    }

    #[test]
    fn union_merge_accumulates_conditions_and_replaces_scalars() {
        let mut store = stored();
        let update = Subject::new("nimal")
            .with(INCOME, 14000)
            .with(HEALTH_CONDITION, "hypertension");

        let merged = store.merge(update, MergePolicy::Union);

        assert_eq!(merged.number(INCOME), Some(14000));
        assert_eq!(merged.number(AGE), Some(52));
        assert!(merged.has(HEALTH_CONDITION, "stage_3_ckd"));
        assert!(merged.has(HEALTH_CONDITION, "hypertension"));
    }

    #[test]
    fn last_write_wins_replaces_condition_set() {
        let mut store = stored();
        let update = Subject::new("nimal").with(HEALTH_CONDITION, "stage_4_ckd");

        let merged = store.merge(update, MergePolicy::LastWriteWins);

        assert_eq!(
            merged.get(HEALTH_CONDITION),
            Some(&[AttributeValue::Term("stage_4_ckd".to_string())][..])
        );
        assert_eq!(merged.number(AGE), Some(52));
    }

    #[test]
    fn merge_creates_missing_subjects() {
        let mut store = FactStore::new();
        store.merge(Subject::new("kamala").with(AGE, 66), MergePolicy::Union);

        assert!(store.contains(&SubjectId::new("kamala")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn merge_policy_parses_aliases() {
        assert_eq!(MergePolicy::parse("Union"), Some(MergePolicy::Union));
        assert_eq!(MergePolicy::parse("lww"), Some(MergePolicy::LastWriteWins));
        assert_eq!(MergePolicy::parse("newest"), None);
    }
}
