//! docsum document text extraction
//!
//! PDF, DOCX and plain-text uploads are stored in a transient file, turned
//! into text and removed again.

mod document;
mod upload;

pub use document::{extract_text, DocumentKind, ALLOWED_EXTENSIONS};
pub use upload::{sanitize_upload_name, UploadedFile};
