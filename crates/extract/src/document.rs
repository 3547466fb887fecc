use std::fs;
use std::io::Read;
use std::path::Path;

use docsum_common::{DocsumError, Result};
use quick_xml::{events::Event, Reader as XmlReader};
use tracing::debug;
use zip::ZipArchive;

/// Extensions accepted for upload
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Detect the format from a filename extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            _ => Err(DocsumError::unsupported_file_type(&ALLOWED_EXTENSIONS)),
        }
    }

    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

/// Extract the text of the document at `path`
///
/// Parse failures are reported as [`DocsumError::Extraction`]; only failing
/// to read the file itself is an I/O error.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String> {
    debug!("Extracting {:?} text from {}", kind, path.display());

    match kind {
        DocumentKind::Pdf => extract_pdf_text(path),
        DocumentKind::Docx => extract_docx_text(path),
        DocumentKind::Txt => extract_plain_text(path),
    }
}

fn extract_pdf_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;

    // pdf-extract can panic on malformed input
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes))
        .map_err(|_| DocsumError::extraction("Failed to parse PDF: malformed document"))?
        .map_err(|e| DocsumError::extraction(format!("Failed to parse PDF: {}", e)))?;

    // One newline-terminated block per page
    let mut text = String::new();
    for page in &pages {
        text.push_str(page.trim_end());
        text.push('\n');
    }

    Ok(text)
}

fn extract_docx_text(path: &Path) -> Result<String> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| DocsumError::extraction(format!("Failed to open DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocsumError::extraction(format!("Missing word/document.xml: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| DocsumError::extraction(format!("Failed to read DOCX XML: {}", e)))?;

    docx_xml_to_text(&xml)
}

fn docx_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut output = String::new();
    let mut in_text_node = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => start_paragraph(&mut output),
                b"w:tab" => output.push('\t'),
                b"w:br" => output.push('\n'),
                b"w:t" => in_text_node = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => start_paragraph(&mut output),
                b"w:tab" => output.push('\t'),
                b"w:br" => output.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_node => {
                let value = e
                    .unescape()
                    .map_err(|err| DocsumError::extraction(format!("Invalid DOCX text: {}", err)))?;
                output.push_str(&value);
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => in_text_node = false,
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(DocsumError::extraction(format!(
                    "Failed to parse DOCX XML: {}",
                    err
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(output.trim().to_string())
}

fn start_paragraph(output: &mut String) {
    if !output.is_empty() {
        output.push_str("\n\n");
    }
}

fn extract_plain_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|_| DocsumError::extraction("Text file is not valid UTF-8"))
}
