use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CrmError, Result};
use crate::model::Session;
use crate::store::{RecordStore, StorageBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub location: String,
    pub patients: usize,
    pub products: usize,
    pub session: Option<Session>,
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let status = StoreStatus {
        location: store.backend().location(),
        patients: snapshot.patients.len(),
        products: snapshot.inventory.len(),
        session: snapshot.session.current().cloned(),
    };
    Ok(CmdResult::default().with_status(status))
}

pub fn reset<B: StorageBackend>(store: &mut RecordStore<B>, confirmed: bool) -> Result<CmdResult> {
    if !confirmed {
        return Err(CrmError::Api(
            "Reset wipes patients, inventory and session. Re-run with --yes".into(),
        ));
    }
    store.reset();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Store reset to empty"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::store::mem_backend::fixtures::StoreFixture;

    #[test]
    fn status_counts_slices() {
        let store = StoreFixture::new()
            .with_patients(3)
            .with_products(1)
            .with_session(Role::Clinic)
            .store;
        let status = run(&store).unwrap().status.unwrap();
        assert_eq!(status.location, "memory://dentcrm");
        assert_eq!(status.patients, 3);
        assert_eq!(status.products, 1);
        assert_eq!(status.session.unwrap().role, Role::Clinic);
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut store = StoreFixture::new().with_patients(2).store;
        assert!(reset(&mut store, false).is_err());
        assert_eq!(store.snapshot().patients.len(), 2);

        reset(&mut store, true).unwrap();
        assert!(store.snapshot().is_empty());
    }
}
