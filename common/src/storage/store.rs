use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::AppError;

use super::types::document::HubDocument;

/// File-backed persistence for the hub document.
///
/// Every operation reads or rewrites the whole file. Writes that go through
/// [`DocumentStore::update`] and [`DocumentStore::replace`] are serialized, so
/// overlapping requests in this process cannot lose each other's changes. Files are
/// replaced by rename, so lock-free reads never observe a half-written document.
#[derive(Clone)]
pub struct DocumentStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, never failing.
    ///
    /// A missing file is created with every collection empty. Read or parse
    /// failures are logged and answered with an empty document that is not written.
    pub async fn load(&self) -> HubDocument {
        match self.read().await {
            Ok(Some(document)) => document,
            Ok(None) => {
                let _guard = self.write_lock.lock().await;
                self.load_locked().await
            }
            Err(err) => Self::degrade(&self.path, &err),
        }
    }

    /// [`DocumentStore::load`] for callers already holding `write_lock`.
    async fn load_locked(&self) -> HubDocument {
        match self.read().await {
            Ok(Some(document)) => document,
            Ok(None) => {
                info!(path = %self.path.display(), "Data file missing, creating empty document");
                let document = HubDocument::default();
                if let Err(err) = self.save(&document).await {
                    return Self::degrade(&self.path, &err);
                }
                document
            }
            Err(err) => Self::degrade(&self.path, &err),
        }
    }

    fn degrade(path: &Path, err: &AppError) -> HubDocument {
        error!(
            error = %err,
            path = %path.display(),
            "Failed to read hub data, using empty document"
        );
        HubDocument::default()
    }

    /// `Ok(None)` when the file does not exist.
    async fn read(&self) -> Result<Option<HubDocument>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite the file with `document`, pretty-printed.
    pub async fn save(&self, document: &HubDocument) -> Result<(), AppError> {
        self.write(document).await.inspect_err(|err| {
            error!(
                error = %err,
                path = %self.path.display(),
                "Failed to save hub data"
            );
        })
    }

    /// Writes a sibling temp file and renames it over the target, so readers see
    /// either the previous document or the new one, never a partial file.
    async fn write(&self, document: &HubDocument) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(document)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), AppError> {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut staged = NamedTempFile::new_in(dir)?;
            staged.write_all(&payload)?;
            staged.as_file().sync_all()?;
            staged.persist(&path).map_err(|err| err.error)?;
            Ok(())
        })
        .await??;

        debug!(path = %self.path.display(), "Hub data written");
        Ok(())
    }

    /// Read-modify-write of the whole document.
    ///
    /// When `apply` returns an error nothing is written and the error is passed on.
    pub async fn update<T, F>(&self, apply: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut HubDocument) -> Result<T, AppError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load_locked().await;
        let outcome = apply(&mut document)?;
        self.save(&document).await?;
        Ok(outcome)
    }

    /// Replace the stored document wholesale.
    pub async fn replace(&self, document: &HubDocument) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.save(document).await
    }
}
