//! Text splitting utilities used by the chunking strategy.
//!
//! All sizes are counted in characters, not bytes.

/// Separator between paragraphs packed into one piece.
const PARAGRAPH_SEP: &str = "\n\n";
/// Separator between sentences or words packed into one piece.
const WORD_SEP: &str = " ";

/// Character count of `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

// ── Lines ───────────────────────────────────────────────────────────────────

/// One `\n`-delimited line of a document and its byte offset.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub start: usize,
    /// Line without its `\n` terminator (may still end in `\r`).
    pub raw: &'a str,
}

impl<'a> Line<'a> {
    /// Line content without a trailing carriage return.
    pub fn text(&self) -> &'a str {
        self.raw.strip_suffix('\r').unwrap_or(self.raw)
    }

    /// Byte offset just past [`Line::text`].
    pub fn end(&self) -> usize {
        self.start + self.text().len()
    }

    /// Byte offset just past [`Line::raw`].
    pub fn raw_end(&self) -> usize {
        self.start + self.raw.len()
    }
}

/// Iterate over the `\n`-separated lines of `text` with their offsets.
/// Like `str::split('\n')`, an empty input yields one empty line.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split('\n').map(move |raw| {
        let line = Line { start: offset, raw };
        offset += raw.len() + 1;
        line
    })
}

// ── Greedy packing ──────────────────────────────────────────────────────────

/// Greedy accumulator: appends units to a running piece while it stays
/// within `limit` characters, collecting completed pieces.
struct Packer {
    limit: usize,
    pieces: Vec<String>,
    current: String,
    current_len: usize,
}

impl Packer {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            pieces: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    /// Append `unit` (joined by `sep`) if the result fits; report whether it did.
    fn try_append(&mut self, unit: &str, sep: &str) -> bool {
        let unit_len = char_len(unit);
        let new_len = if self.current.is_empty() {
            unit_len
        } else {
            self.current_len + sep.len() + unit_len
        };
        if new_len > self.limit {
            return false;
        }
        if !self.current.is_empty() {
            self.current.push_str(sep);
        }
        self.current.push_str(unit);
        self.current_len = new_len;
        true
    }

    /// Replace the running piece with `unit`, which may exceed the limit.
    fn start(&mut self, unit: String) {
        self.current_len = char_len(&unit);
        self.current = unit;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.pieces.push(std::mem::take(&mut self.current));
        }
        self.current_len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.pieces
    }
}

// ── Splitting ───────────────────────────────────────────────────────────────

/// Split `text` at sentence boundaries: the whitespace run after `.`, `!`
/// or `?`. Returns non-empty fragments with their punctuation.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            let mut end_ws = i + c.len_utf8();
            while let Some(&(j, w)) = chars.peek() {
                if !w.is_whitespace() {
                    break;
                }
                end_ws = j + w.len_utf8();
                chars.next();
            }
            if i > start {
                sentences.push(&text[start..i]);
            }
            start = end_ws;
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Split an oversized paragraph into sentence-packed pieces, falling back to
/// word packing for sentences that are themselves too long. A single word
/// longer than `max_chars` becomes its own oversized piece.
fn split_paragraph(paragraph: &str, max_chars: usize) -> Vec<String> {
    let mut packer = Packer::new(max_chars);

    for sentence in split_sentences(paragraph) {
        if packer.try_append(sentence, WORD_SEP) {
            continue;
        }
        packer.flush();
        if char_len(sentence) > max_chars {
            for word in sentence.split_whitespace() {
                if !packer.try_append(word, WORD_SEP) {
                    packer.flush();
                    packer.start(word.to_string());
                }
            }
        } else {
            packer.start(sentence.to_string());
        }
    }
    packer.finish()
}

/// Split `text` into pieces of at most `max_chars` characters, preferring
/// paragraph, then sentence, then word boundaries.
///
/// A block that already fits is returned untouched (whitespace-only blocks
/// yield nothing). The last sentence-piece of an oversized paragraph stays
/// open and may absorb the following paragraph.
pub(crate) fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    if char_len(text) <= max_chars {
        return if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
    }

    let mut packer = Packer::new(max_chars);
    for para in text.split(PARAGRAPH_SEP) {
        let para = para.trim();
        if para.is_empty() || packer.try_append(para, PARAGRAPH_SEP) {
            continue;
        }
        packer.flush();
        if char_len(para) > max_chars {
            let mut pieces = split_paragraph(para, max_chars);
            let tail = pieces.pop();
            packer.pieces.extend(pieces);
            if let Some(tail) = tail {
                packer.start(tail);
            }
        } else {
            packer.start(para.to_string());
        }
    }
    packer.finish()
}

// ── Overlap ─────────────────────────────────────────────────────────────────

/// Word-aligned tail of `text`, at most `overlap` characters long.
///
/// Returns `None` when `text` is not longer than `overlap`, or when the tail
/// holds no complete word.
pub(crate) fn overlap_fragment(text: &str, overlap: usize) -> Option<&str> {
    let total = char_len(text);
    if overlap == 0 || total <= overlap {
        return None;
    }
    let cut = text.char_indices().nth(total - overlap).map(|(i, _)| i)?;
    let tail = &text[cut..];

    let at_word_start = text[..cut]
        .chars()
        .next_back()
        .is_some_and(char::is_whitespace);
    let fragment = if at_word_start {
        tail
    } else {
        let ws = tail.find(char::is_whitespace)?;
        &tail[ws..]
    };

    let fragment = fragment.trim();
    (!fragment.is_empty()).then_some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_track_offsets() {
        let text = "ab\r\ncd\n\nef";
        let lines: Vec<(usize, &str, usize)> = lines_with_offsets(text)
            .map(|l| (l.start, l.text(), l.end()))
            .collect();
        assert_eq!(lines, vec![(0, "ab", 2), (4, "cd", 6), (7, "", 7), (8, "ef", 10)]);
        assert_eq!(lines_with_offsets("").count(), 1);
    }

    #[test]
    fn sentences_split_after_terminal_punctuation() {
        let s = split_sentences("One. Two!  Three?\nFour");
        assert_eq!(s, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn sentences_ignore_inner_punctuation() {
        let s = split_sentences("Version 1.2 is out.Really. Yes");
        assert_eq!(s, vec!["Version 1.2 is out.Really.", "Yes"]);
    }

    #[test]
    fn small_text_is_returned_untouched() {
        assert_eq!(split_text("  hi there \n", 100), vec!["  hi there \n"]);
        assert!(split_text(" \n\n  ", 100).is_empty());
        assert!(split_text("", 100).is_empty());
    }

    #[test]
    fn paragraphs_pack_greedily() {
        let text = "aaaa\n\nbbbb\n\ncccc\n\ndddd";
        // 4 + 2 + 4 = 10 fits, adding a third does not.
        assert_eq!(split_text(text, 12), vec!["aaaa\n\nbbbb", "cccc\n\ndddd"]);
    }

    #[test]
    fn oversized_paragraph_tail_absorbs_next_paragraph() {
        let para = "Alpha beta gamma. Delta epsilon zeta. Eta.";
        let text = format!("{para}\n\nTail.");
        let pieces = split_text(&text, 40);
        assert_eq!(
            pieces,
            vec!["Alpha beta gamma. Delta epsilon zeta.", "Eta.\n\nTail."]
        );
    }

    #[test]
    fn long_sentence_falls_back_to_words() {
        let sentence = vec!["word"; 30].join(" "); // 149 chars
        let pieces = split_text(&sentence, 50);
        assert!(pieces.len() >= 3);
        for p in &pieces {
            assert!(char_len(p) <= 50, "piece too long: {}", char_len(p));
        }
        assert_eq!(pieces.join(" "), sentence);
    }

    #[test]
    fn giant_word_is_its_own_piece() {
        let giant = "x".repeat(30);
        let text = format!("short {giant} tail");
        let pieces = split_text(&text, 10);
        assert_eq!(pieces, vec!["short".to_string(), giant, "tail".to_string()]);
    }

    #[test]
    fn sizes_count_characters_not_bytes() {
        let text = "ééééé ééééé"; // 11 chars, 21 bytes
        assert_eq!(split_text(text, 11), vec![text]);
    }

    #[test]
    fn overlap_starts_at_word_boundary() {
        let text = "the quick brown fox jumps";
        // Last 8 chars: "ox jumps" -> cut mid-word, skip to "jumps".
        assert_eq!(overlap_fragment(text, 8), Some("jumps"));
        // Last 9 chars: "fox jumps" -> already at a word start.
        assert_eq!(overlap_fragment(text, 9), Some("fox jumps"));
    }

    #[test]
    fn overlap_needs_longer_text() {
        assert_eq!(overlap_fragment("short", 5), None);
        assert_eq!(overlap_fragment("short", 50), None);
        assert_eq!(overlap_fragment("anything", 0), None);
    }

    #[test]
    fn overlap_without_whitespace_is_none() {
        assert_eq!(overlap_fragment("abcdefghijklmnop", 5), None);
    }
}
