use std::sync::RwLock;

use super::facts::{Subject, SubjectId};
use super::store::{FactStore, MergePolicy};

/// Storage abstraction so the service can be exercised in isolation.
pub trait SubjectRepository: Send + Sync {
    fn merge(&self, subject: Subject) -> Result<Subject, RepositoryError>;
    fn fetch(&self, id: &SubjectId) -> Result<Option<Subject>, RepositoryError>;
    /// Point-in-time copy of every subject, used for batch evaluation.
    fn snapshot(&self) -> Result<FactStore, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("subject not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local repository. Writes and snapshots never interleave.
#[derive(Debug, Default)]
pub struct InMemorySubjectRepository {
    store: RwLock<FactStore>,
    policy: MergePolicy,
}

impl InMemorySubjectRepository {
    pub fn new(policy: MergePolicy) -> Self {
        Self::with_store(FactStore::new(), policy)
    }

    pub fn with_store(store: FactStore, policy: MergePolicy) -> Self {
        Self {
            store: RwLock::new(store),
            policy,
        }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("subject store lock poisoned".to_string())
}

impl SubjectRepository for InMemorySubjectRepository {
    fn merge(&self, subject: Subject) -> Result<Subject, RepositoryError> {
        let mut guard = self.store.write().map_err(poisoned)?;
        Ok(guard.merge(subject, self.policy).clone())
    }

    fn fetch(&self, id: &SubjectId) -> Result<Option<Subject>, RepositoryError> {
        let guard = self.store.read().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn snapshot(&self) -> Result<FactStore, RepositoryError> {
        let guard = self.store.read().map_err(poisoned)?;
        Ok(guard.clone())
    }
}
