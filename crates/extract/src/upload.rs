use std::io::Write;
use std::path::Path;

use docsum_common::{DocsumError, Result};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::document::{extract_text, DocumentKind};

/// Make a client-supplied filename safe to use on disk
///
/// Path separators and reserved characters are removed, whitespace becomes
/// `_`, and leading/trailing dots and underscores are dropped.
pub fn sanitize_upload_name(filename: &str) -> Result<String> {
    let sanitized = sanitize_filename::sanitize(filename)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let sanitized = sanitized.trim_matches(|c| c == '.' || c == '_');

    if sanitized.is_empty() {
        return Err(DocsumError::invalid_input("No file selected"));
    }

    Ok(sanitized.to_string())
}

/// An uploaded file held on disk only until its text has been extracted
///
/// The backing file is deleted when this value is dropped, including on
/// error and panic paths.
#[derive(Debug)]
pub struct UploadedFile {
    file: NamedTempFile,
    kind: DocumentKind,
    max_bytes: usize,
    written: usize,
}

impl UploadedFile {
    /// Create an empty upload file in `dir` for the (already sanitized) `filename`
    pub fn create(dir: &Path, filename: &str, max_bytes: usize) -> Result<Self> {
        let kind = DocumentKind::from_filename(filename)?;

        let file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&format!(".{}", kind.extension()))
            .tempfile_in(dir)
            .map_err(|e| {
                DocsumError::file_system(format!(
                    "Failed to create upload file in {}: {}",
                    dir.display(),
                    e
                ))
            })?;

        debug!("Storing upload {} at {}", filename, file.path().display());

        Ok(Self {
            file,
            kind,
            max_bytes,
            written: 0,
        })
    }

    /// Append a piece of the upload, enforcing the size limit
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        let written = self.written + data.len();
        if written > self.max_bytes {
            warn!(
                "Upload exceeds limit of {} bytes, rejecting",
                self.max_bytes
            );
            return Err(DocsumError::FileTooLarge {
                limit: self.max_bytes,
            });
        }

        self.file.write_all(data)?;
        self.written = written;
        Ok(())
    }

    /// Detected document format
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.written
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Extract the text and delete the backing file
    ///
    /// Text that is empty after trimming is reported as an extraction error.
    pub fn extract(mut self) -> Result<String> {
        self.file.flush()?;

        let result = extract_text(self.file.path(), self.kind);
        self.remove();

        let text = result?;
        if text.trim().is_empty() {
            return Err(DocsumError::extraction(
                "Could not extract text from the file or file is empty",
            ));
        }

        Ok(text)
    }

    fn remove(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!("Failed to remove upload file {}: {}", path.display(), e);
        }
    }
}
