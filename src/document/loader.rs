//! One-shot document loading with extension-based type detection

use crate::errors::{PipelineError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Text,
    Markdown,
}

impl DocumentType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// The immutable source text of one report
///
/// Loaded once at process start; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub document_type: DocumentType,
    pub content: String,
}

impl Document {
    /// Load a report from disk, extracting text according to its extension.
    ///
    /// PDF text extraction is delegated wholesale to `pdf-extract`; this
    /// crate only consumes the resulting plain text.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let document_type = DocumentType::from_extension(ext).ok_or_else(|| {
            PipelineError::RetrievalFailure(format!(
                "Unsupported report format '.{}' (expected pdf, txt, or md)",
                ext
            ))
        })?;

        let content = match document_type {
            DocumentType::Pdf => pdf_extract::extract_text(path).map_err(|e| {
                PipelineError::RetrievalFailure(format!(
                    "Failed to extract text from {}: {}",
                    path.display(),
                    e
                ))
            })?,
            DocumentType::Text | DocumentType::Markdown => fs::read_to_string(path)?,
        };

        if content.trim().is_empty() {
            return Err(PipelineError::RetrievalFailure(format!(
                "{} contained no extractable text",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            document_type,
            content,
        })
    }

    /// Construct a document from already-extracted text
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            path: PathBuf::new(),
            document_type: DocumentType::Text,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_type_from_extension() {
        assert_eq!(DocumentType::from_extension("pdf"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("PDF"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("txt"), Some(DocumentType::Text));
        assert_eq!(
            DocumentType::from_extension("md"),
            Some(DocumentType::Markdown)
        );
        assert_eq!(DocumentType::from_extension("docx"), None);
    }

    #[test]
    fn test_load_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Roof: shingles show wear").unwrap();

        let doc = Document::load(file.path()).unwrap();
        assert_eq!(doc.document_type, DocumentType::Text);
        assert!(doc.content.contains("shingles"));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let result = Document::load(file.path());
        assert!(matches!(result, Err(PipelineError::RetrievalFailure(_))));
    }

    #[test]
    fn test_load_rejects_empty_file() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let result = Document::load(file.path());
        assert!(matches!(result, Err(PipelineError::RetrievalFailure(_))));
    }

    #[test]
    fn test_from_text() {
        let doc = Document::from_text("inline report");
        assert_eq!(doc.content, "inline report");
    }
}
