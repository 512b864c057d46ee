//! Partial-success results for batch stages.

use crate::error::{PigeonError, PigeonResult};

/// The result of a batch stage that stops at the first failure.
///
/// `completed` holds every item finished before the failure, in input order.
/// A failure never discards them: the caller can still export what was
/// signed or streamed before the batch stopped.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    completed: Vec<T>,
    error: Option<PigeonError>,
}

impl<T> BatchOutcome<T> {
    /// A batch where every item completed.
    pub fn success(completed: Vec<T>) -> Self {
        Self {
            completed,
            error: None,
        }
    }

    /// A batch that stopped at `error` after completing `completed`.
    pub fn failed(completed: Vec<T>, error: PigeonError) -> Self {
        Self {
            completed,
            error: Some(error),
        }
    }

    /// Items completed before any failure.
    pub fn completed(&self) -> &[T] {
        &self.completed
    }

    /// The terminating error, if the batch stopped early.
    pub fn error(&self) -> Option<&PigeonError> {
        self.error.as_ref()
    }

    /// Returns true if the batch ran to the end.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Splits the outcome into completed items and the terminating error.
    pub fn into_parts(self) -> (Vec<T>, Option<PigeonError>) {
        (self.completed, self.error)
    }

    /// Converts into a plain result, dropping partial items on failure.
    ///
    /// # Errors
    ///
    /// Returns the terminating error if the batch stopped early.
    pub fn into_result(self) -> PigeonResult<Vec<T>> {
        match self.error {
            None => Ok(self.completed),
            Some(e) => Err(e),
        }
    }
}
