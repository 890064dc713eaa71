use std::path::{Path, PathBuf};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::fs;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Hard ceiling on files per upload call, independent of the per-item cap
pub const MAX_UPLOAD_FILES: usize = 5;

/// Maximum accepted size per file (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for upload routes: a full batch plus multipart framing
pub const MAX_REQUEST_BYTES: usize = MAX_UPLOAD_FILES * MAX_UPLOAD_BYTES + 1024 * 1024;

/// Public path prefix under which stored photos are served
const PUBLIC_PREFIX: &str = "/uploads/items";

/// A raw uploaded file as read off the multipart boundary
#[derive(Debug)]
pub struct UploadFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Persistence seam for uploaded photo bytes.
///
/// `store` validates and writes a whole batch, returning one public URL per
/// file in input order; it must not leave partial writes behind on failure.
/// `discard` is the best-effort rollback used when a later step rejects the
/// batch, so no file exists without a corresponding photo row.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, files: &[UploadFile]) -> AppResult<Vec<String>>;
    async fn discard(&self, urls: &[String]);
}

/// Local-disk media store writing under `<root>/items`
pub struct DiskMediaStore {
    dir: PathBuf,
}

impl DiskMediaStore {
    pub async fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = root.as_ref().join("items");
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn validate(file: &UploadFile) -> AppResult<()> {
        match &file.content_type {
            Some(ct) if ct.starts_with("image/") => {}
            _ => {
                return Err(AppError::Validation(
                    "only image uploads are accepted".to_string(),
                ))
            }
        }

        if file.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "file exceeds the {} MiB limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        Ok(())
    }

    /// Collision-resistant storage name: millisecond timestamp, random
    /// suffix, and the sanitized original extension
    fn storage_name(file_name: Option<&str>) -> String {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let suffix = Uuid::new_v4().simple().to_string();

        let ext: Option<String> = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ext.chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .take(8)
                    .collect::<String>()
                    .to_ascii_lowercase()
            })
            .filter(|ext| !ext.is_empty());

        match ext {
            Some(ext) => format!("{millis}-{suffix}.{ext}"),
            None => format!("{millis}-{suffix}"),
        }
    }

    async fn cleanup(&self, written: &[PathBuf]) {
        for path in written {
            if let Err(err) = fs::remove_file(path).await {
                tracing::warn!(path = %path.display(), "failed to remove upload after rollback: {err}");
            }
        }
    }
}

#[async_trait]
impl MediaStore for DiskMediaStore {
    async fn store(&self, files: &[UploadFile]) -> AppResult<Vec<String>> {
        if files.is_empty() {
            return Err(AppError::Validation("no files uploaded".to_string()));
        }
        if files.len() > MAX_UPLOAD_FILES {
            return Err(AppError::Validation(format!(
                "at most {MAX_UPLOAD_FILES} files per upload"
            )));
        }
        for file in files {
            Self::validate(file)?;
        }

        let mut written: Vec<PathBuf> = Vec::with_capacity(files.len());
        let mut urls = Vec::with_capacity(files.len());

        for file in files {
            let name = Self::storage_name(file.file_name.as_deref());
            let path = self.dir.join(&name);

            if let Err(err) = fs::write(&path, &file.bytes).await {
                // Roll back earlier writes from this call before surfacing
                self.cleanup(&written).await;
                return Err(AppError::Storage(format!(
                    "failed to persist upload: {err}"
                )));
            }

            written.push(path);
            urls.push(format!("{PUBLIC_PREFIX}/{name}"));
        }

        Ok(urls)
    }

    async fn discard(&self, urls: &[String]) {
        let paths: Vec<PathBuf> = urls
            .iter()
            .filter_map(|url| url.rsplit('/').next())
            .map(|name| self.dir.join(name))
            .collect();

        self.cleanup(&paths).await;
    }
}
