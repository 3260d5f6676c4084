//! The document store: one JSON file, one in-memory copy.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use guidepost_protocol::{Codec, JsonCodec, NavigationDocument};
use tokio::io::AsyncWriteExt;

use crate::StoreError;

/// Owns the canonical navigation document and its backing file.
///
/// ## Invariant
///
/// `current()` always equals either the boot-time load or the last
/// document passed to a successful [`save`](Self::save). A failed save
/// leaves it untouched.
///
/// ## Concurrency
///
/// Not thread-safe by itself. The server keeps it behind a
/// `tokio::sync::Mutex`, so a save and a concurrent read can never
/// observe a half-replaced document.
pub struct DocumentStore<C: Codec = JsonCodec> {
    path: PathBuf,
    current: NavigationDocument,
    codec: C,
}

impl DocumentStore<JsonCodec> {
    /// Opens the store at `path` using JSON, loading whatever is there.
    ///
    /// Never fails: see [`load`](Self::load).
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with_codec(path, JsonCodec).await
    }
}

impl<C: Codec> DocumentStore<C> {
    /// Opens the store at `path` with a specific codec.
    pub async fn open_with_codec(path: impl Into<PathBuf>, codec: C) -> Self {
        let path = path.into();
        let current = load_or_empty(&path, &codec).await;
        Self {
            path,
            current,
            codec,
        }
    }

    /// Returns the in-memory document.
    pub fn current(&self) -> &NavigationDocument {
        &self.current
    }

    /// Reads the backing file, substituting an empty document if it's
    /// missing, unreadable, or malformed.
    ///
    /// This doesn't touch the in-memory copy; it reports what's on disk.
    pub async fn load(&self) -> NavigationDocument {
        load_or_empty(&self.path, &self.codec).await
    }

    /// Reads the backing file strictly.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    ///
    /// # Errors
    /// - [`StoreError::ReadFailed`]: the file exists but can't be read
    /// - [`StoreError::DecodeFailed`]: the contents aren't a document
    pub async fn try_load(
        &self,
    ) -> Result<Option<NavigationDocument>, StoreError> {
        read_document(&self.path, &self.codec).await
    }

    /// Replaces the stored document, on disk first, then in memory.
    ///
    /// The bytes go to a sibling `*.tmp` file which is synced and then
    /// renamed over the target, so readers of the file see either the
    /// old document or the new one, never a truncated mix.
    ///
    /// # Errors
    /// Returns [`StoreError::WriteFailed`] if any step fails. The
    /// in-memory document is unchanged in that case.
    pub async fn save(
        &mut self,
        doc: NavigationDocument,
    ) -> Result<(), StoreError> {
        match self.write_file(&doc).await {
            Ok(()) => {
                tracing::info!(
                    path = %self.path.display(),
                    tabs = doc.tabs.len(),
                    "document saved"
                );
                self.current = doc;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "document save failed");
                Err(e)
            }
        }
    }

    /// Overwrites only the title and persists the result.
    ///
    /// Used at startup so the configured title wins over whatever the
    /// file had.
    pub async fn set_title(
        &mut self,
        title: impl Into<String>,
    ) -> Result<(), StoreError> {
        let mut doc = self.current.clone();
        doc.title = title.into();
        self.save(doc).await
    }

    async fn write_file(&self, doc: &NavigationDocument) -> Result<(), StoreError> {
        let write_err = |source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let mut bytes = self
            .codec
            .encode(doc)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        bytes.push(b'\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
            }
        }

        let tmp = temp_path(&self.path);
        let result: std::io::Result<()> = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = result {
            // Best effort; the tmp file may not even exist.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }
        Ok(())
    }
}

/// `data.json` → `data.json.tmp`, in the same directory so the rename
/// stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn read_document<C: Codec>(
    path: &Path,
    codec: &C,
) -> Result<Option<NavigationDocument>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::ReadFailed {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    codec
        .decode(&bytes)
        .map(Some)
        .map_err(|source| StoreError::DecodeFailed {
            path: path.to_path_buf(),
            source,
        })
}

async fn load_or_empty<C: Codec>(path: &Path, codec: &C) -> NavigationDocument {
    match read_document(path, codec).await {
        Ok(Some(doc)) => {
            tracing::info!(path = %path.display(), "document loaded");
            doc
        }
        Ok(None) => {
            tracing::info!(
                path = %path.display(),
                "no document file, starting empty"
            );
            NavigationDocument::default()
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "document unusable, substituting empty document"
            );
            NavigationDocument::default()
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
