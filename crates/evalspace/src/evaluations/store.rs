use std::sync::{Mutex, MutexGuard, PoisonError};

use super::domain::{EvaluationId, EvaluationRecord};

/// Append-only record collection for one session, newest first.
///
/// `prepend` is crate-private so records can only enter through
/// [`super::EvaluationWorkspace::submit`].
#[derive(Debug, Default)]
pub struct SessionStore {
    records: Mutex<Vec<EvaluationRecord>>,
}

impl SessionStore {
    fn lock(&self) -> MutexGuard<'_, Vec<EvaluationRecord>> {
        // records are only ever pushed whole, so a poisoned guard still holds a valid list
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn prepend(&self, record: EvaluationRecord) {
        self.lock().insert(0, record);
    }

    pub fn snapshot(&self) -> Vec<EvaluationRecord> {
        self.lock().clone()
    }

    pub fn find(&self, id: &EvaluationId) -> Option<EvaluationRecord> {
        self.lock().iter().find(|record| &record.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
