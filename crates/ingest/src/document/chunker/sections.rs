//! Heading sectioner.

use super::helpers::lines_with_offsets;

/// A contiguous run of the document governed by one heading (or none).
///
/// `content` starts with the heading line itself and is exactly
/// `source[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section<'a> {
    pub heading: Option<&'a str>,
    pub start: usize,
    pub end: usize,
    pub content: &'a str,
}

/// Text of an ATX heading line (`#` to `######`, whitespace, then text), trimmed.
pub(crate) fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

/// Split `text` into heading-delimited sections, in order.
///
/// Always returns at least one section: a document without headings (or an
/// empty one) is a single section with no heading.
pub(crate) fn split_by_headings(text: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut heading: Option<&str> = None;
    let mut start: Option<usize> = None;
    let mut end = 0;

    for line in lines_with_offsets(text) {
        if let Some(h) = heading_text(line.raw) {
            if let Some(s) = start {
                sections.push(Section {
                    heading,
                    start: s,
                    end,
                    content: &text[s..end],
                });
            }
            heading = Some(h);
            start = Some(line.start);
        } else if start.is_none() {
            start = Some(line.start);
        }
        end = line.raw_end();
    }

    if let Some(s) = start {
        sections.push(Section {
            heading,
            start: s,
            end,
            content: &text[s..end],
        });
    }
    sections
}
