use crate::error::Result;

/// Raw persistence for the store's JSON blob.
///
/// The backend only moves bytes to and from one named location. Decoding, falling back to
/// defaults and deciding when to write belong to [`super::RecordStore`].
pub trait StorageBackend {
    /// Read the persisted blob.
    /// Returns Ok(None) if nothing has been written yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn load(&self) -> Result<Option<String>>;

    /// Replace the persisted blob.
    /// MUST be atomic (e.g. write to tmp then rename) so a reader never sees half a blob.
    fn save(&self, blob: &str) -> Result<()>;

    /// Where the blob lives, for display. A real path for `FsBackend`, a virtual one otherwise.
    fn location(&self) -> String;
}
