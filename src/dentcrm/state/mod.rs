//! # Store State
//!
//! [`StoreState`] is the single typed aggregate behind the record store. Each slice is its
//! own struct with its own transitions; they are composed here once, at construction, and
//! never merged dynamically.
//!
//! Everything in this module is pure: no I/O, no logging, no knowledge of where the state
//! is kept. The store layer decides when to persist.
//!
//! ## Copy-on-write
//!
//! The store hands out [`Snapshot`]s (`Arc<StoreState>`). List slices keep their items
//! behind an `Arc` too, and transitions go through `Arc::make_mut`: if nobody else holds
//! the list it is appended in place, otherwise it is cloned first. A reader holding an older
//! snapshot therefore never sees a later append.
//!
//! ## Wire shape
//!
//! Slices serialize transparently, so the aggregate is exactly
//! `{ "patients": [...], "inventory": [...], "session": {...} | null }`.
//! Missing keys fall back to the empty slice.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod inventory;
pub mod patients;
pub mod session;

pub use inventory::InventorySlice;
pub use patients::PatientSlice;
pub use session::SessionSlice;

/// An immutable view of the complete store at one instant.
pub type Snapshot = Arc<StoreState>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreState {
    pub patients: PatientSlice,
    pub inventory: InventorySlice,
    pub session: SessionSlice,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blob(blob: &str) -> Result<Self> {
        Ok(serde_json::from_str(blob)?)
    }

    pub fn to_blob(&self, pretty: bool) -> Result<String> {
        let blob = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(blob)
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty() && self.inventory.is_empty() && !self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PatientSummary, ProductSummary, Role, Session};
    use serde_json::json;

    #[test]
    fn default_blob_shape() {
        let blob = StoreState::new().to_blob(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(
            value,
            json!({ "patients": [], "inventory": [], "session": null })
        );
    }

    #[test]
    fn populated_state_survives_blob() {
        let mut state = StoreState::new();
        state.patients.append(PatientSummary::new(1, "Mario Rossi"));
        let mut implant = ProductSummary::new(3, "Implant");
        implant.quantity = Some(12);
        state.inventory.append(implant);
        state
            .session
            .set(Session::new("u1", "a@b.com", Role::Clinic).with_token("t0k"));

        let parsed = StoreState::from_blob(&state.to_blob(true).unwrap()).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn foreign_fields_survive_append_and_resave() {
        let blob = json!({
            "patients": [{ "id": 1, "name": "Mario Rossi", "address": "Via Roma 1" }],
            "inventory": [{ "id": 4, "name": "Implant", "lot": "L-88" }],
            "session": { "userId": "u1", "email": "a@b.com", "role": "Clinic", "clinicId": 9 }
        })
        .to_string();
        let mut state = StoreState::from_blob(&blob).unwrap();
        state.patients.append(PatientSummary::new(2, "Anna"));

        let saved: serde_json::Value =
            serde_json::from_str(&state.to_blob(false).unwrap()).unwrap();
        assert_eq!(saved["patients"][0]["address"], "Via Roma 1");
        assert_eq!(saved["patients"][1], json!({ "id": 2, "name": "Anna" }));
        assert_eq!(saved["inventory"][0]["lot"], "L-88");
        assert_eq!(saved["session"]["clinicId"], 9);
        assert_eq!(saved["session"]["role"], "clinic");
    }

    #[test]
    fn missing_keys_default_to_empty_slices() {
        let state = StoreState::from_blob(r#"{"patients":[{"id":2,"name":"Anna"}]}"#).unwrap();
        assert_eq!(state.patients.len(), 1);
        assert!(state.inventory.is_empty());
        assert!(state.session.current().is_none());
    }

    #[test]
    fn malformed_blob_is_an_error_here() {
        assert!(StoreState::from_blob("{not json").is_err());
        assert!(StoreState::from_blob(r#"{"patients": 4}"#).is_err());
    }

    #[test]
    fn earlier_snapshot_is_untouched_by_append() {
        let mut current: Snapshot = Arc::new(StoreState::new());
        Arc::make_mut(&mut current)
            .patients
            .append(PatientSummary::new(1, "A"));

        let held = Arc::clone(&current);
        Arc::make_mut(&mut current)
            .patients
            .append(PatientSummary::new(2, "B"));

        assert_eq!(held.patients.len(), 1);
        assert_eq!(current.patients.len(), 2);
    }
}
