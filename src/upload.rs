use std::collections::HashMap;
use std::path::Path;

use axum::http::HeaderMap;
use bytes::Bytes;
use chrono::Utc;

use crate::error::AppError;

pub const ARTICLE_MIME_TYPES: &[&str] = &["application/pdf"];
pub const BANNER_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// A file written to the upload directory.
#[derive(Debug)]
pub struct StoredFile {
    /// Filename within the upload directory, served under `/uploads`.
    pub path: String,
    pub original_name: String,
    pub content_type: String,
    pub size: usize,
}

/// A validated upload held in memory, not yet on disk. The handler stores
/// it only after the rest of the request has been validated, so a rejected
/// request never leaves a file behind.
#[derive(Debug)]
pub struct PendingFile {
    pub original_name: String,
    pub content_type: String,
    data: Bytes,
}

impl PendingFile {
    /// Write the file under `dest_dir` with a generated name.
    pub async fn store(self, dest_dir: &Path) -> Result<StoredFile, AppError> {
        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| AppError::Internal(format!("upload dir: {e}")))?;

        let stored = stored_name(&self.original_name);
        tokio::fs::write(dest_dir.join(&stored), &self.data)
            .await
            .map_err(|e| AppError::Internal(format!("file write: {e}")))?;

        Ok(StoredFile {
            path: stored,
            original_name: self.original_name,
            content_type: self.content_type,
            size: self.data.len(),
        })
    }
}

/// Parsed multipart form: text fields plus at most one pending file.
#[derive(Debug)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub file: Option<PendingFile>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Result<&str, AppError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest(format!("missing required field '{name}'")))
    }

    pub fn require_file(self) -> Result<(PendingFile, HashMap<String, String>), AppError> {
        match self.file {
            Some(file) => Ok((file, self.fields)),
            None => Err(AppError::BadRequest("a file upload is required".to_string())),
        }
    }
}

/// Parse a multipart request, enforcing the MIME allow-list and size cap.
///
/// Nothing touches disk here; [`PendingFile::store`] writes the file once
/// the handler has finished validating the request.
pub async fn receive(
    headers: &HeaderMap,
    body: Bytes,
    allowed_types: &[&str],
    max_size: usize,
) -> Result<UploadForm, AppError> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| AppError::BadRequest("missing multipart boundary".to_string()))?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fields = HashMap::new();
    let mut file: Option<PendingFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("unknown").to_string();

        if let Some(original_name) = field.file_name().map(|f| f.to_string()) {
            if file.is_some() {
                return Err(AppError::BadRequest(
                    "only one file per request is accepted".to_string(),
                ));
            }

            let content_type = field
                .content_type()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            if !allowed_types.contains(&content_type.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "unsupported file type '{content_type}', expected one of: {}",
                    allowed_types.join(", ")
                )));
            }

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("file read error: {e}")))?;
            if data.len() > max_size {
                return Err(AppError::BadRequest(format!(
                    "file exceeds the upload limit of {max_size} bytes"
                )));
            }

            file = Some(PendingFile {
                original_name,
                content_type,
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("field read error: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(UploadForm { fields, file })
}

/// Collision-resistant stored filename: UTC timestamp, random suffix, and
/// the original extension.
fn stored_name(original: &str) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!(
        "{}-{:08x}{ext}",
        Utc::now().format("%Y%m%d%H%M%S%3f"),
        rand::random::<u32>()
    )
}

#[cfg(test)]
mod tests {
    use super::stored_name;

    #[test]
    fn stored_name_keeps_extension() {
        let name = stored_name("paper.pdf");
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains("paper"));
    }

    #[test]
    fn stored_name_without_extension() {
        let name = stored_name("README");
        assert!(!name.contains('.'));
    }

    #[test]
    fn stored_names_differ() {
        assert_ne!(stored_name("a.pdf"), stored_name("a.pdf"));
    }
}
