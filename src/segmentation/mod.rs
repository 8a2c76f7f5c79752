//! Sentence-level text segmentation
//!
//! Splits accepted document text into an ordered sequence of trimmed,
//! non-empty segments. Segmentation is deterministic: the same text and
//! segmenter configuration always produce the same segments. The whole
//! document is segmented before any distribution begins; this is not a
//! streaming generator.

use crate::domain::Segment;
use std::collections::HashSet;

/// Segmenter configuration
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Tokens before a period that do not end a sentence (lowercased,
    /// without the trailing dot)
    pub abbreviations: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            abbreviations: [
                "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "no", "vs", "etc", "e.g",
                "i.e", "rs", "ref",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Rule-based sentence segmenter
///
/// Sentence boundaries are terminator runs (`.`, `!`, `?`) followed by
/// whitespace, plus blank-line paragraph breaks. A small abbreviation list
/// suppresses false boundaries after titles and shorthand.
pub struct Segmenter {
    abbreviations: HashSet<String>,
}

impl Segmenter {
    /// Creates a segmenter with the default configuration
    pub fn new() -> Self {
        Self::with_config(SegmenterConfig::default())
    }

    /// Creates a segmenter with a custom configuration
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self {
            abbreviations: config
                .abbreviations
                .into_iter()
                .map(|a| a.to_lowercase())
                .collect(),
        }
    }

    /// Split text into ordered, trimmed, non-empty segments
    ///
    /// Indices are dense and start at 0 over the surviving segments.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let mut sentences = Vec::new();
        for paragraph in split_paragraphs(text) {
            self.split_sentences(paragraph, &mut sentences);
        }

        sentences
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(index, text)| Segment::new(index, text))
            .collect()
    }

    fn split_sentences(&self, paragraph: &str, out: &mut Vec<String>) {
        let bytes = paragraph.as_bytes();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < bytes.len() {
            let c = bytes[i] as char;
            if c == '.' || c == '!' || c == '?' {
                // Consume the whole terminator run ("...", "?!").
                let mut end = i + 1;
                while end < bytes.len() && matches!(bytes[end] as char, '.' | '!' | '?') {
                    end += 1;
                }

                let followed_by_space =
                    end >= bytes.len() || (bytes[end] as char).is_whitespace();
                let abbreviation = c == '.' && end == i + 1 && self.is_abbreviation(paragraph, i);

                if followed_by_space && !abbreviation {
                    out.push(paragraph[start..end].to_string());
                    start = end;
                }
                i = end;
            } else {
                i += 1;
            }
        }

        if start < bytes.len() {
            out.push(paragraph[start..].to_string());
        }
    }

    /// Whether the token ending at byte `dot` (exclusive) is a known
    /// abbreviation or a single initial
    fn is_abbreviation(&self, paragraph: &str, dot: usize) -> bool {
        let head = &paragraph[..dot];
        let token_start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(p, c)| p + c.len_utf8())
            .unwrap_or(0);
        let token = head[token_start..].trim_matches(|c: char| !c.is_alphanumeric() && c != '.');
        if token.is_empty() {
            return false;
        }
        let lowered = token.to_lowercase();
        if self.abbreviations.contains(&lowered) {
            return true;
        }
        // Single-letter initials: "A. Kumar".
        token.chars().count() == 1 && token.chars().all(|c| c.is_alphabetic())
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on blank lines; single newlines stay inside a paragraph
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut rest = text;
    while let Some(pos) = find_blank_line(rest) {
        let (head, tail) = rest.split_at(pos);
        paragraphs.push(head);
        rest = tail.trim_start_matches(['\r', '\n']);
    }
    if !rest.is_empty() {
        paragraphs.push(rest);
    }
    paragraphs
}

fn find_blank_line(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'\n' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] == b'\r' {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'\n' {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}
