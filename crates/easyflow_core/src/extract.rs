//! crates/easyflow_core/src/extract.rs
//!
//! Text extraction from uploaded syllabus files. Plain text is decoded
//! directly, .docx is unpacked from its WordprocessingML archive, and PDF is
//! handled only when the optional `pdf` feature is compiled in. Extraction is
//! attempted exactly once per request; there are no retries.

use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::UploadedDocument;

pub const MEDIA_TYPE_TEXT: &str = "text/plain";
pub const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MEDIA_TYPE_PDF: &str = "application/pdf";

/// The declared media types the extractor recognizes, in the order they are
/// reported back to callers on an unsupported upload.
pub const ACCEPTED_MEDIA_TYPES: [&str; 3] =
    [MEDIA_TYPE_TEXT, MEDIA_TYPE_DOCX, MEDIA_TYPE_PDF];

/// A failure while turning an uploaded file into plain text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {received}")]
    UnsupportedFormat {
        received: String,
        /// Extra guidance for the caller, e.g. which formats to use instead.
        note: Option<String>,
    },
    #[error("The document contained no extractable text")]
    EmptyExtraction,
    #[error("Could not read the document: {0}")]
    InvalidDocument(String),
}

/// Extracts plain text from an uploaded document based on its declared
/// media type. Whitespace-only results count as empty.
pub fn extract_text(doc: &UploadedDocument) -> Result<String, ExtractError> {
    let text = match doc.media_type.as_str() {
        MEDIA_TYPE_TEXT => String::from_utf8_lossy(&doc.bytes).into_owned(),
        MEDIA_TYPE_DOCX => extract_docx(&doc.bytes)?,
        MEDIA_TYPE_PDF => extract_pdf(&doc.bytes)?,
        other => {
            return Err(ExtractError::UnsupportedFormat {
                received: other.to_string(),
                note: None,
            })
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyExtraction);
    }
    Ok(text)
}

//=========================================================================================
// .docx
//=========================================================================================

/// Pulls paragraph text, in document order, out of `word/document.xml`.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ExtractError::InvalidDocument(format!("not a valid .docx archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::InvalidDocument(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::InvalidDocument(format!("unreadable word/document.xml: {e}")))?;

    document_xml_to_text(&xml)
}

/// Walks the WordprocessingML event stream, collecting `<w:t>` runs and
/// inserting line breaks at paragraph and explicit break boundaries.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:br" => out.push('\n'),
                b"w:tab" => out.push('\t'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let run = t
                    .unescape()
                    .map_err(|e| ExtractError::InvalidDocument(format!("bad XML text run: {e}")))?;
                out.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::InvalidDocument(format!(
                    "malformed document XML: {e}"
                )))
            }
            _ => {}
        }
    }

    Ok(out)
}

//=========================================================================================
// PDF (optional capability)
//=========================================================================================

#[cfg(feature = "pdf")]
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::UnsupportedFormat {
        received: MEDIA_TYPE_PDF.to_string(),
        note: Some(format!(
            "PDF extraction failed ({e}); upload a .txt or .docx file instead"
        )),
    })
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_bytes: &[u8]) -> Result<String, ExtractError> {
    Err(ExtractError::UnsupportedFormat {
        received: MEDIA_TYPE_PDF.to_string(),
        note: Some(
            "PDF extraction is not available in this deployment; upload a .txt or .docx file instead"
                .to_string(),
        ),
    })
}

//=========================================================================================
// Tests
//=========================================================================================
