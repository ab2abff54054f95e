//! Local media storage for review attachments.
//!
//! Validates an upload against the extension allow-list and size cap,
//! stores it under the upload directory with a UUID-prefixed sanitized
//! name, and returns the `/uploads/...` reference threaded into reviews.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use drillpad_core::error::QuizError;
use drillpad_core::traits::MediaStore;

/// Extensions accepted for review attachments.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "mp4", "mov", "webm",
];

/// Default upload cap: 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Media store writing into a local directory.
pub struct LocalMediaStore {
    upload_dir: PathBuf,
    max_bytes: u64,
}

impl LocalMediaStore {
    pub fn new(upload_dir: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            max_bytes,
        }
    }
}

/// Keep the final path component and replace anything outside
/// `[A-Za-z0-9._-]` with `_`, so client-supplied names cannot escape the
/// upload directory.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn extension_allowed(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, QuizError> {
        if !extension_allowed(filename) {
            return Err(QuizError::InvalidInput(format!(
                "file type not allowed: {filename}"
            )));
        }
        if bytes.len() as u64 > self.max_bytes {
            return Err(QuizError::InvalidInput(format!(
                "file exceeds the {} byte upload limit",
                self.max_bytes
            )));
        }

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(filename));
        std::fs::create_dir_all(&self.upload_dir).map_err(|e| {
            QuizError::StorageUnavailable(format!(
                "create {}: {e}",
                self.upload_dir.display()
            ))
        })?;
        let path = self.upload_dir.join(&stored_name);
        std::fs::write(&path, bytes).map_err(|e| {
            QuizError::StorageUnavailable(format!("write {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "media stored");
        Ok(format!("/uploads/{stored_name}"))
    }
}

/// Helper for callers holding a stored reference who need the on-disk
/// path (static file serving lives outside this crate).
pub fn stored_path(upload_dir: &Path, reference: &str) -> Option<PathBuf> {
    reference
        .strip_prefix("/uploads/")
        .map(|name| upload_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories_and_odd_chars() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn extension_allow_list() {
        assert!(extension_allowed("notes.TXT"));
        assert!(extension_allowed("clip.webm"));
        assert!(!extension_allowed("script.sh"));
        assert!(!extension_allowed("no_extension"));
    }

    #[tokio::test]
    async fn stores_and_returns_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), DEFAULT_MAX_UPLOAD_BYTES);

        let reference = store.store("diagram.png", b"png-bytes").await.unwrap();
        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with("_diagram.png"));

        let on_disk = stored_path(dir.path(), &reference).unwrap();
        assert_eq!(std::fs::read(on_disk).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn rejects_disallowed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), DEFAULT_MAX_UPLOAD_BYTES);

        let err = store.store("payload.exe", b"bytes").await.unwrap_err();
        assert!(matches!(err, QuizError::InvalidInput(_)), "{err}");
    }

    #[tokio::test]
    async fn rejects_oversized_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), 8);

        let err = store.store("big.png", b"nine bytes").await.unwrap_err();
        assert!(matches!(err, QuizError::InvalidInput(_)), "{err}");
    }
}
