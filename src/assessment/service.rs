use std::sync::Arc;

use tracing::info;

use super::engine::{EvaluationEngine, EvaluationResult};
use super::facts::{Subject, SubjectId};
use super::repository::{RepositoryError, SubjectRepository};
use super::validation::{SubjectValidator, ValidationError};

/// Outcome of a batch run over every stored subject.
#[derive(Debug, Default)]
pub struct BatchAssessment {
    pub results: Vec<EvaluationResult>,
    pub rejected: Vec<(SubjectId, ValidationError)>,
}

/// Service composing the validator, repository, and evaluation engine.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    validator: SubjectValidator,
    engine: Arc<EvaluationEngine>,
}

impl<R> AssessmentService<R>
where
    R: SubjectRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            validator: SubjectValidator,
            engine: Arc::new(EvaluationEngine::new()),
        }
    }

    /// Evaluate a subject without storing it.
    pub fn assess(&self, subject: &Subject) -> Result<EvaluationResult, AssessmentServiceError> {
        Ok(self.engine.evaluate(subject)?)
    }

    /// Validate and merge a subject into the repository, returning the stored record.
    pub fn register(&self, subject: Subject) -> Result<Subject, AssessmentServiceError> {
        self.validator.validate(&subject)?;
        let stored = self.repository.merge(subject)?;
        info!(subject = %stored.id, attributes = stored.attributes.len(), "subject registered");
        Ok(stored)
    }

    /// Evaluate a previously registered subject.
    pub fn assess_stored(
        &self,
        subject_id: &SubjectId,
    ) -> Result<EvaluationResult, AssessmentServiceError> {
        let subject = self
            .repository
            .fetch(subject_id)?
            .ok_or(RepositoryError::NotFound)?;
        self.assess(&subject)
    }

    /// Evaluate every stored subject against one snapshot.
    pub fn assess_all(&self) -> Result<BatchAssessment, AssessmentServiceError> {
        let snapshot = self.repository.snapshot()?;
        let mut batch = BatchAssessment::default();
        for (subject_id, outcome) in self.engine.evaluate_all(&snapshot) {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(error) => batch.rejected.push((subject_id, error)),
            }
        }
        info!(
            evaluated = batch.results.len(),
            rejected = batch.rejected.len(),
            "batch assessment finished"
        );
        Ok(batch)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
