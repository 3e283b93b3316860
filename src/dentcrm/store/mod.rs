//! # Record Store
//!
//! [`RecordStore`] owns the current [`Snapshot`] and is the only thing allowed to replace
//! it. Views read snapshots, call a mutation, and get notified with the next snapshot.
//!
//! ## Lifecycle
//!
//! ```text
//!   open(backend) ──► Uninitialized ──(first read or mutation)──► Ready ──► close()
//! ```
//!
//! The first access loads the persisted blob exactly once. A blob that is missing, can't be
//! read, or doesn't decode is treated as absent and the store starts from
//! [`StoreState::default`]. That is logged, never returned as an error.
//!
//! ## Persistence
//!
//! Every mutation writes the full state through the injected [`StorageBackend`]. The write
//! is fire-and-forget: a failure is logged and the in-memory state stays updated. Callers
//! that need to know use [`RecordStore::flush`] or [`RecordStore::close`], which propagate.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file in the data directory, written atomically
//! - [`mem_backend::MemBackend`]: in-memory, with write-failure simulation for tests
//!
//! The store is single-threaded: reads take `&self` and lazily initialize through a
//! `RefCell`, mutations take `&mut self`.

use crate::error::Result;
use crate::model::{PatientSummary, ProductSummary, Session};
use crate::state::{Snapshot, StoreState};
use std::cell::RefCell;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

pub struct RecordStore<B: StorageBackend> {
    backend: B,
    current: RefCell<Option<Snapshot>>,
    pretty: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Wraps a backend. Nothing is read until the store is first used.
    pub fn open(backend: B) -> Self {
        Self {
            backend,
            current: RefCell::new(None),
            pretty: true,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.current.borrow().is_some() {
            Lifecycle::Ready
        } else {
            Lifecycle::Uninitialized
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut current = self.current.borrow_mut();
        match current.as_ref() {
            Some(snapshot) => Arc::clone(snapshot),
            None => {
                let snapshot = Arc::new(self.load_initial());
                *current = Some(Arc::clone(&snapshot));
                snapshot
            }
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.snapshot().session.current().cloned()
    }

    // --- Mutations ---

    pub fn set_session(&mut self, session: Session) {
        self.mutate(|state| state.session.set(session));
    }

    pub fn clear_session(&mut self) {
        self.mutate(|state| state.session.clear());
    }

    pub fn add_patient(&mut self, patient: PatientSummary) {
        self.mutate(|state| state.patients.append(patient));
    }

    pub fn add_product(&mut self, product: ProductSummary) {
        self.mutate(|state| state.inventory.append(product));
    }

    /// Back to the empty default, persisted like any other mutation.
    pub fn reset(&mut self) {
        self.mutate(|state| *state = StoreState::default());
    }

    // --- Listeners ---

    /// Registers a listener called with every new snapshot, in registration order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // --- Explicit persistence ---

    /// Writes the current snapshot and reports failures, unlike mutations.
    pub fn flush(&self) -> Result<()> {
        let blob = self.snapshot().to_blob(self.pretty)?;
        self.backend.save(&blob)
    }

    /// Ends the store's lifetime. A Ready store writes its final snapshot; an untouched one
    /// leaves the persisted blob alone.
    pub fn close(self) -> Result<B> {
        if self.lifecycle() == Lifecycle::Ready {
            self.flush()?;
        }
        debug!(location = %self.backend.location(), "record store closed");
        Ok(self.backend)
    }

    fn mutate<F: FnOnce(&mut StoreState)>(&mut self, apply: F) {
        let mut next = match self.current.get_mut().take() {
            Some(snapshot) => snapshot,
            None => Arc::new(self.load_initial()),
        };
        apply(Arc::make_mut(&mut next));
        *self.current.get_mut() = Some(Arc::clone(&next));

        self.persist(&next);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&next);
        }
    }

    fn persist(&self, state: &StoreState) {
        let written = state
            .to_blob(self.pretty)
            .and_then(|blob| self.backend.save(&blob));
        match written {
            Ok(()) => debug!(location = %self.backend.location(), "store snapshot persisted"),
            Err(e) => warn!(
                location = %self.backend.location(),
                error = %e,
                "failed to persist store snapshot"
            ),
        }
    }

    fn load_initial(&self) -> StoreState {
        let location = self.backend.location();
        let state = match self.backend.load() {
            Ok(Some(blob)) => match StoreState::from_blob(&blob) {
                Ok(state) => state,
                Err(e) => {
                    warn!(%location, error = %e, "persisted store is malformed, using defaults");
                    StoreState::default()
                }
            },
            Ok(None) => {
                debug!(%location, "no persisted store, starting empty");
                StoreState::default()
            }
            Err(e) => {
                warn!(%location, error = %e, "persisted store is unreadable, using defaults");
                StoreState::default()
            }
        };
        debug!(
            %location,
            patients = state.patients.len(),
            products = state.inventory.len(),
            "record store ready"
        );
        state
    }
}
