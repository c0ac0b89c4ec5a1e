//! CSV fact loader. Each row records one `subject,attribute,value` fact.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::facts::{normalize_term, AttributeValue, Subject, SubjectId};
use super::store::{FactStore, MergePolicy};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open fact file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse fact file: {0}")]
    Csv(#[from] csv::Error),
    #[error("fact on line {line} has an empty subject, attribute or value")]
    EmptyField { line: u64 },
}

#[derive(Debug, Deserialize)]
struct FactRow {
    subject: String,
    attribute: String,
    value: String,
}

/// Parse facts into subjects, in first-seen order of their identifiers.
pub fn parse_subjects<R: Read>(reader: R) -> Result<Vec<Subject>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut order = Vec::new();
    let mut subjects: BTreeMap<SubjectId, Subject> = BTreeMap::new();

    let headers = csv_reader.headers()?.clone();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or_default();
        let row: FactRow = record.deserialize(Some(&headers))?;
        let subject_id = SubjectId::normalized(&row.subject);
        let attribute = normalize_term(&row.attribute);
        if subject_id.as_str().is_empty() || attribute.is_empty() || row.value.trim().is_empty() {
            return Err(IngestError::EmptyField { line });
        }

        let subject = subjects.entry(subject_id.clone()).or_insert_with(|| {
            order.push(subject_id.clone());
            Subject {
                id: subject_id.clone(),
                attributes: BTreeMap::new(),
            }
        });
        let value = AttributeValue::parse(&row.value);
        if let Some(previous) = subject.record(&attribute, value.clone()) {
            if previous != value {
                warn!(
                    subject = %subject_id,
                    attribute = %attribute,
                    %previous,
                    incoming = %value,
                    line,
                    "fact file holds conflicting values; keeping the later one"
                );
            }
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|id| subjects.remove(&id))
        .collect())
}

/// Parse facts and merge them into `store` under `policy`.
pub fn load_into<R: Read>(
    reader: R,
    store: &mut FactStore,
    policy: MergePolicy,
) -> Result<usize, IngestError> {
    let subjects = parse_subjects(reader)?;
    let count = subjects.len();
    for subject in subjects {
        store.merge(subject, policy);
    }
    info!(subjects = count, %policy, "facts loaded");
    Ok(count)
}

pub fn load_path(path: impl AsRef<Path>, policy: MergePolicy) -> Result<FactStore, IngestError> {
    let file = File::open(path)?;
    let mut store = FactStore::new();
    load_into(file, &mut store, policy)?;
    Ok(store)
}
