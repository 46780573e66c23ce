//! Paragraph-aware chunking of report text
//!
//! Inspection reports are section-structured ("Roof", "Plumbing", ...), so
//! chunks are cut at blank lines and labeled with the nearest heading-like
//! line. Oversized paragraphs are split at sentence boundaries.

use super::loader::Document;

/// One searchable slice of the report
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: usize,
    /// Nearest preceding heading, if any
    pub section: Option<String>,
    pub text: String,
}

/// Split a document into section-labeled chunks no longer than
/// `max_chunk_chars`.
pub fn chunk_document(document: &Document, max_chunk_chars: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current_section: Option<String> = None;

    for paragraph in split_paragraphs(&document.content) {
        if let Some(heading) = heading_of(&paragraph) {
            current_section = Some(heading);
        }

        for piece in split_oversized(&paragraph, max_chunk_chars) {
            chunks.push(Chunk {
                id: chunks.len(),
                section: current_section.clone(),
                text: piece,
            });
        }
    }

    chunks
}

/// Paragraphs are runs of non-blank lines
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

/// Treat the first line as a heading when it is short and looks like a
/// section label ("Roof:", "# Plumbing", "EXTERIOR").
fn heading_of(paragraph: &str) -> Option<String> {
    let first = paragraph.lines().next()?.trim();
    if first.len() > 60 {
        return None;
    }

    let stripped = first.trim_start_matches('#').trim();
    let label = stripped.split(':').next().unwrap_or(stripped).trim();

    if label.is_empty() {
        return None;
    }

    let looks_like_heading = first.starts_with('#')
        || first.ends_with(':')
        || stripped.contains(':')
        || (first.chars().all(|c| !c.is_lowercase()) && first.split_whitespace().count() <= 5);

    if looks_like_heading {
        Some(label.to_string())
    } else {
        None
    }
}

/// Split a paragraph longer than the limit at sentence ends, hard-splitting
/// only when a single sentence exceeds the limit.
fn split_oversized(paragraph: &str, max_chars: usize) -> Vec<String> {
    if paragraph.len() <= max_chars {
        return vec![paragraph.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(paragraph) {
        if !current.is_empty() && current.len() + sentence.len() + 1 > max_chars {
            pieces.push(std::mem::take(&mut current));
        }

        if sentence.len() > max_chars {
            // Single sentence over the limit: cut on char boundaries
            let mut rest = sentence.as_str();
            while rest.len() > max_chars {
                let cut = floor_char_boundary(rest, max_chars);
                pieces.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
            current = rest.to_string();
        } else if current.is_empty() {
            current = sentence;
        } else {
            current.push(' ');
            current.push_str(&sentence);
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            sentences.push(current.trim().to_string());
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index.max(1)
}
