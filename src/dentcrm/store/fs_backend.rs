use super::backend::StorageBackend;
use crate::error::{CrmError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_STORE_FILE: &str = "dental-crm-store.json";

/// Keeps the blob in a single JSON file under a data directory.
pub struct FsBackend {
    root: PathBuf,
    file_name: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_STORE_FILE.to_string(),
        }
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        if name.ends_with(".json") {
            self.file_name = name.to_string();
        } else {
            self.file_name = format!("{}.json", name);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CrmError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<String>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(path).map_err(CrmError::Io)?;
        Ok(Some(blob))
    }

    fn save(&self, blob: &str) -> Result<()> {
        self.ensure_dir()?;

        let tmp_file = self.root.join(format!(".store-{}.tmp", Uuid::new_v4()));
        let written = fs::write(&tmp_file, blob).and_then(|_| fs::rename(&tmp_file, self.path()));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_file);
            return Err(CrmError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path().display().to_string()
    }
}
