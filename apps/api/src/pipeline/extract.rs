//! Document Extractor — turns an uploaded file's raw bytes into plain text.
//!
//! Dispatch is strictly by declared media type. An unrecognized type is a
//! typed rejection, never a fall-through to a default parser, and a failure
//! inside one format must not be retried with a different parser.

use bytes::Bytes;
use docx_rs::read_docx;

use crate::pipeline::PipelineError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";

/// An uploaded file as received at the boundary. Consumed by extraction;
/// nothing outlives the pipeline run.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub declared_media_type: String,
    pub filename: String,
}

/// Extracts plain UTF-8 text from the document, dispatching on its declared
/// media type. An empty result is valid (low-confidence), not an error.
pub fn extract(document: &RawDocument) -> Result<String, PipelineError> {
    // "text/plain; charset=utf-8" and friends carry parameters after ';'
    let essence = document
        .declared_media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();

    match essence {
        MIME_PDF => extract_pdf(&document.bytes),
        MIME_DOCX => extract_docx(&document.bytes),
        MIME_TEXT => extract_text(&document.bytes),
        other => Err(PipelineError::UnsupportedFormat {
            media_type: other.to_string(),
        }),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, PipelineError> {
    // pdf-extract joins page text with newlines in page order
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| PipelineError::ExtractionFailure {
        format: "pdf",
        cause: e.to_string(),
    })
}

/// Walks the docx tree (Document → Paragraph → Run → Text), joining runs
/// within a paragraph with no separator and paragraphs with a newline.
fn extract_docx(bytes: &[u8]) -> Result<String, PipelineError> {
    let docx = read_docx(bytes).map_err(|e| PipelineError::ExtractionFailure {
        format: "docx",
        cause: format!("{e:?}"),
    })?;

    let mut paragraphs: Vec<String> = Vec::new();

    for child in &docx.document.children {
        use docx_rs::DocumentChild;

        if let DocumentChild::Paragraph(para) = child {
            let para_text = paragraph_text(para);
            // Skip section breaks and blank lines
            if !para_text.trim().is_empty() {
                paragraphs.push(para_text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts = Vec::new();

    for child in &para.children {
        use docx_rs::ParagraphChild;

        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                use docx_rs::RunChild;

                if let RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }

    // Runs are fragments of the same sentence
    parts.join("")
}

fn extract_text(bytes: &[u8]) -> Result<String, PipelineError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| PipelineError::ExtractionFailure {
        format: "text",
        cause: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn raw(bytes: Vec<u8>, media_type: &str) -> RawDocument {
        RawDocument {
            bytes: Bytes::from(bytes),
            declared_media_type: media_type.to_string(),
            filename: "cv.bin".to_string(),
        }
    }

    #[test]
    fn test_plain_text_extraction() {
        let doc = raw(b"Jane Doe\nRust Engineer".to_vec(), MIME_TEXT);
        let text = extract(&doc).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Rust Engineer"));
    }

    #[test]
    fn test_media_type_parameters_are_ignored() {
        let doc = raw(b"hello".to_vec(), "text/plain; charset=utf-8");
        assert_eq!(extract(&doc).unwrap(), "hello");
    }

    #[test]
    fn test_empty_text_is_valid() {
        let doc = raw(Vec::new(), MIME_TEXT);
        assert_eq!(extract(&doc).unwrap(), "");
    }

    #[test]
    fn test_unrecognized_media_type_is_typed_rejection() {
        let doc = raw(b"GIF89a".to_vec(), "image/gif");
        match extract(&doc) {
            Err(PipelineError::UnsupportedFormat { media_type }) => {
                assert_eq!(media_type, "image/gif");
            }
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_text_fails_with_extraction_failure() {
        let doc = raw(vec![0xff, 0xfe, 0x80], MIME_TEXT);
        match extract(&doc) {
            Err(PipelineError::ExtractionFailure { format, .. }) => {
                assert_eq!(format, "text");
            }
            other => panic!("expected ExtractionFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_pdf_fails_with_extraction_failure() {
        let doc = raw(b"not a pdf at all".to_vec(), MIME_PDF);
        match extract(&doc) {
            Err(PipelineError::ExtractionFailure { format, .. }) => {
                assert_eq!(format, "pdf");
            }
            other => panic!("expected ExtractionFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_docx_paragraphs_join_with_newline() {
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("10 years in fintech")));

        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();

        let doc = raw(buf.into_inner(), MIME_DOCX);
        let text = extract(&doc).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("10 years in fintech"));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_garbage_docx_fails_with_extraction_failure() {
        let doc = raw(b"PK but not really a zip".to_vec(), MIME_DOCX);
        match extract(&doc) {
            Err(PipelineError::ExtractionFailure { format, .. }) => {
                assert_eq!(format, "docx");
            }
            other => panic!("expected ExtractionFailure, got {other:?}"),
        }
    }
}
