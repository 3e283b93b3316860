use crate::model::PatientSummary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Known patients, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientSlice {
    items: Arc<Vec<PatientSummary>>,
}

impl PatientSlice {
    /// Appends at the end. Duplicate ids are kept; the backend owns uniqueness.
    pub fn append(&mut self, patient: PatientSummary) {
        Arc::make_mut(&mut self.items).push(patient);
    }

    pub fn as_slice(&self) -> &[PatientSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First patient added with this id.
    pub fn find(&self, id: i64) -> Option<&PatientSummary> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Case-insensitive match on the name.
    pub fn search(&self, term: &str) -> Vec<&PatientSummary> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// One past the highest id, or `None` once `i64::MAX` is taken.
    pub fn next_id(&self) -> Option<i64> {
        self.items.iter().map(|p| p.id).max().unwrap_or(0).checked_add(1)
    }
}
