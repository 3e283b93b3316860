use super::backend::StorageBackend;
use crate::error::{CrmError, Result};
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded, which lets
/// `StorageBackend` keep `&self` on every method.
#[derive(Default)]
pub struct MemBackend {
    blob: RefCell<Option<String>>,
    simulate_write_error: Cell<bool>,
    loads: Cell<usize>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with something already "on disk".
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.blob.borrow_mut() = Some(blob.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<String>> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.blob.borrow().clone())
    }

    fn save(&self, blob: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CrmError::Store("Simulated write error".to_string()));
        }
        self.saves.set(self.saves.get() + 1);
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory://dentcrm".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{PatientSummary, ProductSummary, Role, Session};
    use crate::store::RecordStore;

    pub struct StoreFixture {
        pub store: RecordStore<MemBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::open(MemBackend::new()),
            }
        }

        pub fn with_patients(mut self, count: usize) -> Self {
            for i in 0..count {
                let id = i as i64 + 1;
                self.store
                    .add_patient(PatientSummary::new(id, format!("Test Patient {}", id)));
            }
            self
        }

        pub fn with_products(mut self, count: usize) -> Self {
            for i in 0..count {
                let id = i as i64 + 1;
                self.store
                    .add_product(ProductSummary::new(id, format!("Test Product {}", id)));
            }
            self
        }

        pub fn with_session(mut self, role: Role) -> Self {
            self.store
                .set_session(Session::new("fixture-user", "fixture@clinic.test", role));
            self
        }
    }
}
