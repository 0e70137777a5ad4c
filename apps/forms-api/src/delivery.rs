//! One-shot delivery of generated documents
//!
//! Each generated file is registered under a fresh id together with the user
//! who requested it. Taking a document removes it from the registry, and the
//! file itself is deleted once its bytes have been read. Documents nobody
//! collects expire and are deleted on the next registry access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// A generated file waiting to be downloaded
#[derive(Debug, Clone)]
pub struct PendingDocument {
    pub owner: String,
    pub download_name: String,
    pub path: PathBuf,
    pub expires_at: DateTime<Utc>,
}

impl PendingDocument {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// In-memory registry of documents awaiting download
#[derive(Debug)]
pub struct DocumentStore {
    pending: Mutex<HashMap<Uuid, PendingDocument>>,
    ttl: Duration,
}

impl DocumentStore {
    /// Documents not taken within `ttl` are discarded
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn register(
        &self,
        owner: impl Into<String>,
        download_name: impl Into<String>,
        path: PathBuf,
    ) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let document = PendingDocument {
            owner: owner.into(),
            download_name: download_name.into(),
            path,
            expires_at: now + self.ttl,
        };
        debug!("Registered document {} at {}", id, document.path.display());

        let mut pending = self.pending.lock().await;
        sweep(&mut pending, now);
        pending.insert(id, document);
        id
    }

    /// Remove and return the document if `owner` requested it
    ///
    /// A foreign owner gets `DocumentNotFound` and the entry is left for its
    /// owner. A registered file that no longer exists is dropped, and so is
    /// an expired one.
    pub async fn take(&self, id: Uuid, owner: &str) -> Result<PendingDocument, ApiError> {
        let mut pending = self.pending.lock().await;
        sweep(&mut pending, Utc::now());
        let not_found = || ApiError::DocumentNotFound(id.to_string());

        match pending.get(&id) {
            Some(doc) if doc.owner == owner => {}
            _ => return Err(not_found()),
        }
        let document = pending.remove(&id).ok_or_else(not_found)?;

        if !document.path.exists() {
            warn!("Document {} was registered but its file is gone", id);
            return Err(not_found());
        }
        Ok(document)
    }

    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }
}

/// Drop expired entries and delete their files
fn sweep(pending: &mut HashMap<Uuid, PendingDocument>, now: DateTime<Utc>) {
    pending.retain(|id, doc| {
        if doc.is_expired(now) {
            info!("Document {} expired without being downloaded", id);
            remove_file(&doc.path);
            false
        } else {
            true
        }
    });
}

/// Delete generated documents left in `dir` by an earlier run
///
/// The registry lives in memory, so nothing found here at startup can still
/// be downloaded.
pub fn clear_stale(dir: &Path) -> std::io::Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let generated = path.extension().map_or(false, |ext| ext == "docx");
        if generated && path.is_file() {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn remove_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Failed to remove {}: {}", path.display(), e);
    } else {
        debug!("Removed {}", path.display());
    }
}

/// Deletes a file when dropped unless disarmed
#[derive(Debug)]
pub struct FileGuard {
    path: Option<PathBuf>,
}

impl FileGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Keep the file
    pub fn disarm(mut self) {
        self.path = None;
    }
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            remove_file(&path);
        }
    }
}
