//! Best-time persistence
//!
//! Backends:
//! - `LocalStore`: browser LocalStorage (wasm32)
//! - `FileStore`: a one-line file in the home directory (native)
//! - `MemoryStore`: in-process, with failure injection for tests
//!
//! Every backend stores the record as a plain decimal integer.

use thiserror::Error;

/// Storage failures. Callers treat all of them as recoverable.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is not a whole number of seconds: {0:?}")]
    Corrupt(String),
    #[error("storage backend rejected the operation: {0}")]
    Backend(String),
}

/// Somewhere a single best-time integer can be kept between sessions
pub trait RecordStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<u32>, StorageError>;
    fn save(&mut self, secs: u32) -> Result<(), StorageError>;
}

/// Parse a stored record, tolerating surrounding whitespace
pub fn parse_record(raw: &str) -> Result<u32, StorageError> {
    raw.trim()
        .parse()
        .map_err(|_| StorageError::Corrupt(raw.to_string()))
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(secs: u32) -> Self {
        Self {
            value: Some(secs),
            ..Self::default()
        }
    }

    /// Make every load fail
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every save fail
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable);
        }
        Ok(self.value)
    }

    fn save(&mut self, secs: u32) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable);
        }
        self.value = Some(secs);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use super::{RecordStore, StorageError, parse_record};

    const FILE_NAME: &str = ".sky_dodge_best_time";

    /// Record kept in a one-line text file
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `$HOME/.sky_dodge_best_time`, or the working directory without `HOME`
        pub fn in_home() -> Self {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            Self::new(PathBuf::from(home).join(FILE_NAME))
        }
    }

    impl RecordStore for FileStore {
        fn load(&self) -> Result<Option<u32>, StorageError> {
            match std::fs::read_to_string(&self.path) {
                Ok(raw) => parse_record(&raw).map(Some),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn save(&mut self, secs: u32) -> Result<(), StorageError> {
            std::fs::write(&self.path, secs.to_string())?;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{RecordStore, StorageError, parse_record};

    /// Record kept under one LocalStorage key
    #[derive(Debug, Clone)]
    pub struct LocalStore {
        key: String,
    }

    impl Default for LocalStore {
        fn default() -> Self {
            Self::new("sky_dodge_best_time")
        }
    }

    impl LocalStore {
        pub fn new(key: impl Into<String>) -> Self {
            Self { key: key.into() }
        }

        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)
        }
    }

    impl RecordStore for LocalStore {
        fn load(&self) -> Result<Option<u32>, StorageError> {
            let raw = Self::storage()?
                .get_item(&self.key)
                .map_err(|e| StorageError::Backend(format!("{:?}", e)))?;
            raw.as_deref().map(parse_record).transpose()
        }

        fn save(&mut self, secs: u32) -> Result<(), StorageError> {
            Self::storage()?
                .set_item(&self.key, &secs.to_string())
                .map_err(|e| StorageError::Backend(format!("{:?}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        assert_eq!(parse_record("42").unwrap(), 42);
        assert_eq!(parse_record(" 7\n").unwrap(), 7);
        assert!(matches!(parse_record("-3"), Err(StorageError::Corrupt(_))));
        assert!(matches!(parse_record("abc"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(12).unwrap();
        assert_eq!(store.load().unwrap(), Some(12));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store() {
        let path = std::env::temp_dir().join(format!(
            "sky_dodge_best_time_test_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        store.save(31).unwrap();
        assert_eq!(store.load().unwrap(), Some(31));

        std::fs::write(&path, "garbage").unwrap();
        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));

        let _ = std::fs::remove_file(&path);
    }
}
