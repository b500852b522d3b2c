//! Clause boundary detection.
//!
//! The input boundary may supply explicit clause spans; when it does not, the
//! engine falls back to structural splitting: numbered section headers when
//! the document has them, paragraph breaks otherwise, and the whole document
//! as a last resort.

use lazy_static::lazy_static;
use regex::Regex;

use risk_types::ClauseSpan;

use crate::textutil::excerpt;

// Sections shorter than this are headers or noise, not clauses.
const MIN_SECTION_CHARS: usize = 30;
const MIN_PARAGRAPH_CHARS: usize = 50;
const MIN_HEADERS_FOR_SECTIONS: usize = 3;

lazy_static! {
    static ref SECTION_HEADER: Regex =
        Regex::new(r"(?m)^\s*\d+(?:\.\d+)*[.)]?\s+[A-Z][^\n]*").expect("static regex");
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").expect("static regex");
}

/// Split a document into clause spans with document-order indexes.
pub fn split(text: &str) -> Vec<ClauseSpan> {
    let headers: Vec<(usize, usize)> = SECTION_HEADER
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut spans = if headers.len() >= MIN_HEADERS_FOR_SECTIONS {
        split_by_sections(text, &headers)
    } else {
        split_by_paragraphs(text)
    };

    if spans.is_empty() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            let start = text.find(trimmed).unwrap_or(0);
            spans.push(ClauseSpan {
                index: 0,
                start,
                end: start + trimmed.len(),
                text: trimmed.to_string(),
                label: None,
            });
        }
    }

    for (index, span) in spans.iter_mut().enumerate() {
        span.index = index;
    }
    spans
}

fn split_by_sections(text: &str, headers: &[(usize, usize)]) -> Vec<ClauseSpan> {
    let mut spans = Vec::with_capacity(headers.len());
    for (i, &(start, header_end)) in headers.iter().enumerate() {
        let end = headers
            .get(i + 1)
            .map(|&(next_start, _)| next_start)
            .unwrap_or(text.len());
        let body = text[header_end..end].trim();
        if body.len() < MIN_SECTION_CHARS {
            continue;
        }
        let label = excerpt(&text[start..header_end], 60);
        spans.push(ClauseSpan {
            index: 0,
            start,
            end,
            text: text[start..end].trim_end().to_string(),
            label: Some(label),
        });
    }
    spans
}

fn split_by_paragraphs(text: &str) -> Vec<ClauseSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    let mut boundaries: Vec<usize> = PARAGRAPH_BREAK.find_iter(text).map(|m| m.start()).collect();
    boundaries.push(text.len());

    for boundary in boundaries {
        let raw = &text[cursor..boundary];
        let trimmed = raw.trim();
        if trimmed.len() >= MIN_PARAGRAPH_CHARS {
            let offset = cursor + raw.find(trimmed).unwrap_or(0);
            spans.push(ClauseSpan {
                index: 0,
                start: offset,
                end: offset + trimmed.len(),
                text: trimmed.to_string(),
                label: None,
            });
        }
        cursor = boundary;
    }
    spans
}

/// Index of the clause containing `offset`, or the nearest clause when the
/// match falls between boundaries.
pub fn containing_clause(spans: &[ClauseSpan], offset: usize) -> Option<usize> {
    if spans.is_empty() {
        return None;
    }
    if let Some(span) = spans.iter().find(|s| s.start <= offset && offset < s.end) {
        return Some(span.index);
    }
    spans
        .iter()
        .min_by_key(|s| {
            if offset < s.start {
                s.start - offset
            } else {
                offset - s.end.min(offset)
            }
        })
        .map(|s| s.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONED: &str = "\
1. Definitions\nIn this Agreement the following terms have the meanings set out below for all purposes.\n\n\
2. Payment Terms\nCustomer shall pay all invoices within thirty days of receipt, without deduction or set-off.\n\n\
3. Termination\nEither party may terminate this Agreement for material breach upon written notice and a cure period.\n";

    #[test]
    fn test_numbered_sections_are_detected() {
        let spans = split(SECTIONED);
        assert_eq!(spans.len(), 3);
        assert!(spans[0].label.as_deref().unwrap().contains("Definitions"));
        assert!(spans[2].label.as_deref().unwrap().contains("Termination"));
        assert_eq!(spans.iter().map(|s| s.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_paragraph_fallback() {
        let text = "This agreement covers the provision of consulting services to the client.\n\n\
                    All fees are due within thirty days and are non-refundable once invoiced.";
        let spans = split(text);
        assert_eq!(spans.len(), 2);
        assert!(spans[1].text.contains("non-refundable"));
    }

    #[test]
    fn test_whole_document_fallback() {
        let text = "Short unstructured agreement text with enough length to matter.";
        let spans = split(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].index, 0);
    }

    #[test]
    fn test_span_offsets_point_into_source() {
        let spans = split(SECTIONED);
        for span in &spans {
            assert_eq!(SECTIONED[span.start..span.end].trim_end(), span.text);
        }
    }

    #[test]
    fn test_containing_clause_attribution() {
        let spans = split(SECTIONED);
        let pay_offset = SECTIONED.find("invoices").unwrap();
        assert_eq!(containing_clause(&spans, pay_offset), Some(1));
        assert_eq!(containing_clause(&[], 10), None);
    }
}
