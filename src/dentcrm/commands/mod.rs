//! # Command Layer
//!
//! One module per user-facing operation group. Commands act as the view side of the record
//! store: they validate what a user typed, fill in what the backend would normally assign
//! (ids, login time), call a store mutation and describe what happened in a [`CmdResult`].
//!
//! Commands never print. UI clients render `CmdResult` however they like.

use crate::model::{PatientSummary, ProductSummary, Session};

pub mod inventory;
pub mod patients;
pub mod session;
pub mod status;

pub use inventory::ProductDraft;
pub use patients::PatientDraft;
pub use status::StoreStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub patients: Vec<PatientSummary>,
    pub products: Vec<ProductSummary>,
    pub session: Option<Session>,
    pub status: Option<StoreStatus>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_patients(mut self, patients: Vec<PatientSummary>) -> Self {
        self.patients = patients;
        self
    }

    pub fn with_products(mut self, products: Vec<ProductSummary>) -> Self {
        self.products = products;
        self
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn with_status(mut self, status: StoreStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Trims and drops empty optional inputs.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
