//! Key-value persistence for the recent-search history.

use directories::ProjectDirs;
use std::{
    collections::HashMap,
    fmt::Debug,
    fs, io,
    path::PathBuf,
    sync::Mutex,
};

/// Injected persistence capability, so session behavior stays testable
/// without a real storage backend.
pub trait HistoryStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Store backed by one `{key}.json` file per key under the platform data
/// directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Returns `None` if the platform data directory cannot be determined.
    pub fn new() -> Option<Self> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "lookup-cli")?;
        Some(Self { dir: dirs.data_dir().to_path_buf() })
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HistoryStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(key), value)
    }
}

/// In-memory store. `sealed` makes every write fail, for exercising the
/// persistence failure path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    sealed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sealed() -> Self {
        Self { entries: Mutex::default(), sealed: true }
    }
}

impl HistoryStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        if self.sealed {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "store is sealed"));
        }

        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
