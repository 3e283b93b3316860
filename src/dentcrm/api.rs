//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point for
//! every UI client. It owns the [`RecordStore`], so a client receives the store by
//! construction instead of reaching for a global.
//!
//! ## Generic Over StorageBackend
//!
//! `CrmApi<B: StorageBackend>` is generic over the persistence port:
//! - Production: `CrmApi<FsBackend>`
//! - Testing: `CrmApi<MemBackend>`
//!
//! ## Lifecycle
//!
//! [`CrmApi::new`] takes an opened (still Uninitialized) store; the first call loads the
//! persisted state. [`CrmApi::close`] writes the final snapshot and reports failure, which
//! is the one place a client learns that persistence did not work.

use crate::commands;
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

pub use crate::commands::session::Credentials;
pub use commands::{CmdMessage, CmdResult, MessageLevel, PatientDraft, ProductDraft, StoreStatus};

/// The main API facade for dentcrm operations.
pub struct CrmApi<B: StorageBackend> {
    store: RecordStore<B>,
}

impl<B: StorageBackend> CrmApi<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn login(&mut self, credentials: Credentials) -> Result<CmdResult> {
        commands::session::login(&mut self.store, credentials)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        commands::session::logout(&mut self.store)
    }

    pub fn whoami(&self) -> Result<CmdResult> {
        commands::session::whoami(&self.store)
    }

    pub fn add_patient(&mut self, draft: PatientDraft) -> Result<CmdResult> {
        commands::patients::add(&mut self.store, draft)
    }

    pub fn list_patients(&self, search: Option<&str>) -> Result<CmdResult> {
        commands::patients::list(&self.store, search)
    }

    pub fn show_patient(&self, id: i64) -> Result<CmdResult> {
        commands::patients::show(&self.store, id)
    }

    pub fn add_product(&mut self, draft: ProductDraft) -> Result<CmdResult> {
        commands::inventory::add(&mut self.store, draft)
    }

    pub fn list_products(&self, search: Option<&str>) -> Result<CmdResult> {
        commands::inventory::list(&self.store, search)
    }

    pub fn show_product(&self, id: i64) -> Result<CmdResult> {
        commands::inventory::show(&self.store, id)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.store)
    }

    pub fn reset(&mut self, confirmed: bool) -> Result<CmdResult> {
        commands::status::reset(&mut self.store, confirmed)
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<B> {
        &mut self.store
    }

    pub fn close(self) -> Result<B> {
        self.store.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::store::mem_backend::MemBackend;
    use crate::store::Lifecycle;

    fn api() -> CrmApi<MemBackend> {
        CrmApi::new(RecordStore::open(MemBackend::new()))
    }

    #[test]
    fn construction_does_not_load() {
        let api = api();
        assert_eq!(api.store().lifecycle(), Lifecycle::Uninitialized);
        api.status().unwrap();
        assert_eq!(api.store().lifecycle(), Lifecycle::Ready);
    }

    #[test]
    fn dispatches_session_commands() {
        let mut api = api();
        api.login(Credentials {
            user_id: "u1".into(),
            email: "a@b.com".into(),
            role: Role::Dentist,
            token: Some("tok".into()),
        })
        .unwrap();
        let session = api.whoami().unwrap().session.unwrap();
        assert_eq!(session.token.as_deref(), Some("tok"));

        api.logout().unwrap();
        assert!(api.whoami().unwrap().session.is_none());
    }

    #[test]
    fn dispatches_record_commands() {
        let mut api = api();
        api.add_patient(PatientDraft::named("Mario Rossi")).unwrap();
        api.add_product(ProductDraft::named("Gloves")).unwrap();

        assert_eq!(api.show_patient(1).unwrap().patients[0].name, "Mario Rossi");
        assert_eq!(api.list_products(None).unwrap().products.len(), 1);
        let status = api.status().unwrap().status.unwrap();
        assert_eq!((status.patients, status.products), (1, 1));
    }

    #[test]
    fn listeners_attach_through_store_mut() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut api = api();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        api.store_mut()
            .subscribe(move |_| counter.set(counter.get() + 1));

        api.add_patient(PatientDraft::named("Mario Rossi")).unwrap();
        api.logout().unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn close_hands_back_persisted_backend() {
        let mut api = api();
        api.add_patient(PatientDraft::named("Mario Rossi")).unwrap();
        let backend = api.close().unwrap();
        assert!(backend.blob().unwrap().contains("Mario Rossi"));
    }
}
