// EHR Log Analyzer - core/document.rs
//
// Entry segmentation: turns the saved HTML client log into an ordered
// sequence of (text, severity) entries. This is the only module that knows
// about markup; the extractors in core::parser see plain entries.

use crate::core::model::{EntrySeverity, LogEntry};
use crate::util::constants;
use crate::util::error::ParseError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Reject input that cannot be a markup document at all.
///
/// A document with zero log entries is fine (it yields an empty result);
/// a document with no elements whatsoever, binary data, or no content is
/// not.
pub fn check_document(content: &str) -> Result<(), ParseError> {
    static TAG: OnceLock<Regex> = OnceLock::new();

    if content.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }
    if let Some(offset) = content.find('\0') {
        return Err(ParseError::BinaryContent { offset });
    }

    let tag = TAG.get_or_init(|| {
        Regex::new(r"<[A-Za-z!/?]").expect("check_document: invalid regex")
    });
    if !tag.is_match(content) {
        return Err(ParseError::NoMarkup);
    }
    Ok(())
}

/// Split an HTML client log into entries, in document order.
///
/// Every element carrying the `log-entry` class becomes one entry whose text
/// is the concatenation of all descendant text nodes. An additional `fatal`
/// class marks the entry fatal, `error` marks it an error; `fatal` wins when
/// both are present.
pub fn segment_html(content: &str) -> Result<Vec<LogEntry>, ParseError> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();

    check_document(content)?;

    let selector = SELECTOR.get_or_init(|| {
        Selector::parse(&format!(".{}", constants::LOG_ENTRY_CLASS))
            .expect("segment_html: invalid selector")
    });

    let document = Html::parse_document(content);
    let entries: Vec<LogEntry> = document
        .select(selector)
        .map(|element| LogEntry {
            text: element.text().collect::<String>(),
            severity: classify(&element),
        })
        .collect();

    tracing::debug!(entries = entries.len(), "Document segmented");
    Ok(entries)
}

/// Severity tag from the element's class list.
fn classify(element: &ElementRef<'_>) -> EntrySeverity {
    let mut severity = EntrySeverity::Normal;
    for class in element.value().classes() {
        if class == constants::FATAL_CLASS {
            return EntrySeverity::Fatal;
        }
        if class == constants::ERROR_CLASS {
            severity = EntrySeverity::Error;
        }
    }
    severity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_classifies_entries() {
        let html = r#"<html><body>
            <div class="log-entry">[Session]Alice</div>
            <div class="log-entry error">[EAC] boom</div>
            <div class="log-entry fatal">[EAC] crash</div>
            <div class="log-entry error fatal">both</div>
            <div class="other">ignored</div>
        </body></html>"#;

        let entries = segment_html(html).unwrap();
        let tags: Vec<_> = entries.iter().map(|e| e.severity).collect();
        assert_eq!(
            tags,
            vec![
                EntrySeverity::Normal,
                EntrySeverity::Error,
                EntrySeverity::Fatal,
                EntrySeverity::Fatal,
            ]
        );
        assert_eq!(entries[0].text, "[Session]Alice");
    }

    #[test]
    fn test_segment_concatenates_nested_text_and_decodes_entities() {
        let html = r#"<div class="log-entry"><span class="time">[14:22:05]</span><span>[ReceiveChat]Carl: a &amp; b</span></div>"#;
        let entries = segment_html(html).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "[14:22:05][ReceiveChat]Carl: a & b");
    }

    #[test]
    fn test_document_without_entries_is_valid_and_empty() {
        let entries = segment_html("<html><body><p>nothing here</p></body></html>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_rejects_empty_binary_and_plain_text() {
        assert!(matches!(segment_html("   \n"), Err(ParseError::EmptyDocument)));
        assert!(matches!(
            segment_html("<html>\0\0</html>"),
            Err(ParseError::BinaryContent { offset: 6 })
        ));
        assert!(matches!(
            segment_html("just some text, 3 < 4"),
            Err(ParseError::NoMarkup)
        ));
    }
}
