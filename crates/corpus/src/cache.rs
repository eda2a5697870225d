//! Loader-boundary corpus cache
//!
//! Caching happens only at the loader: every downstream stage is a pure
//! function over the snapshot it is handed. Entries are keyed by path and
//! invalidated by the file's modification time, so an unchanged source is
//! parsed once per change rather than once per interaction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use tracing::debug;

use paperscope_common::errors::{AppError, Result};

use crate::loader::{Corpus, CorpusLoader};

/// Modification-time keyed cache around [`CorpusLoader`]
#[derive(Debug, Default)]
pub struct CachedLoader {
    loader: CorpusLoader,
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    modified: SystemTime,
    corpus: Arc<Corpus>,
}

impl CachedLoader {
    /// Wrap a loader with a cache
    pub fn new(loader: CorpusLoader) -> Self {
        Self {
            loader,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Load the paper table, reusing the cached snapshot while the file's
    /// modification time is unchanged
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Corpus>> {
        let path = path.as_ref();
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|_| AppError::CorpusNotFound {
                path: path.display().to_string(),
            })?;

        let mut entries = self.entries.lock().expect("corpus cache poisoned");
        if let Some(entry) = entries.get(path) {
            if entry.modified == modified {
                debug!(path = %path.display(), "corpus cache hit");
                return Ok(Arc::clone(&entry.corpus));
            }
        }

        let corpus = Arc::new(self.loader.load(path)?);
        entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                corpus: Arc::clone(&corpus),
            },
        );
        Ok(corpus)
    }

    /// Drop the cached snapshot for one path
    pub fn invalidate(&self, path: impl AsRef<Path>) {
        self.entries
            .lock()
            .expect("corpus cache poisoned")
            .remove(path.as_ref());
    }

    /// Drop all cached snapshots
    pub fn clear(&self) {
        self.entries.lock().expect("corpus cache poisoned").clear();
    }
}
