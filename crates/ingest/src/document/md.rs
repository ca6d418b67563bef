use ragchunk_core::IngestError;

use super::chunker::{first_heading, has_tables};
use super::ExtractedText;

pub fn extract_md(bytes: &[u8]) -> Result<ExtractedText, IngestError> {
    let text = String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());
    let text = text.trim().to_string();

    Ok(ExtractedText {
        title: first_heading(&text).map(str::to_string),
        has_tables: has_tables(&text),
        has_images: text.contains("!["),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_first_heading() {
        let content = b"Intro line.\n\n## Section 1\n\nMore text.\n\n# Later\n";
        let doc = extract_md(content).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Section 1"));
    }

    #[test]
    fn preserves_full_content() {
        let content = b"# Hello\n\nParagraph one.\n\n## World\n\nParagraph two.";
        let doc = extract_md(content).unwrap();
        assert!(doc.text.contains("Paragraph one."));
        assert!(doc.text.contains("Paragraph two."));
    }

    #[test]
    fn no_headings() {
        let doc = extract_md(b"Just plain text without any headings.").unwrap();
        assert!(doc.title.is_none());
        assert!(!doc.has_tables);
        assert_eq!(doc.text, "Just plain text without any headings.");
    }

    #[test]
    fn detects_tables_and_images() {
        let doc = extract_md(b"| a | b |\n| 1 | 2 |\n\n![chart](c.png)").unwrap();
        assert!(doc.has_tables);
        assert!(doc.has_images);
    }

    #[test]
    fn empty_markdown() {
        let doc = extract_md(b"").unwrap();
        assert_eq!(doc.text, "");
        assert!(doc.title.is_none());
    }
}
