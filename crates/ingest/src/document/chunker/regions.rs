//! Protected-region scanner: Markdown tables and fenced code blocks.
//!
//! Works line by line instead of with multiline patterns, so scanning stays
//! linear in the input size.

use super::helpers::{lines_with_offsets, Line};

/// What kind of block a protected region covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegionKind {
    Table,
    CodeFence,
}

/// A half-open byte range of the source text that must not be split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProtectedRegion<'a> {
    pub start: usize,
    pub end: usize,
    pub content: &'a str,
    pub kind: RegionKind,
}

/// All protected regions of one document, in document order.
#[derive(Debug, Default)]
pub(crate) struct ProtectedRegions<'a> {
    regions: Vec<ProtectedRegion<'a>>,
}

impl<'a> ProtectedRegions<'a> {
    fn of_kind(&self, kind: RegionKind) -> impl Iterator<Item = &ProtectedRegion<'a>> {
        self.regions.iter().filter(move |r| r.kind == kind)
    }

    pub fn tables(&self) -> impl Iterator<Item = &ProtectedRegion<'a>> {
        self.of_kind(RegionKind::Table)
    }

    pub fn code_fences(&self) -> impl Iterator<Item = &ProtectedRegion<'a>> {
        self.of_kind(RegionKind::CodeFence)
    }

    /// Table regions fully contained in `start..end`.
    pub fn tables_within(
        &self,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = &ProtectedRegion<'a>> {
        self.tables().filter(move |t| t.start >= start && t.end <= end)
    }
}

/// A table row: starts and ends with a pipe, with something in between.
fn is_table_line(line: &str) -> bool {
    line.len() >= 3 && line.starts_with('|') && line.ends_with('|')
}

fn is_fence_line(line: &str) -> bool {
    line.starts_with("```")
}

fn region<'a>(text: &'a str, start: usize, end: usize, kind: RegionKind) -> ProtectedRegion<'a> {
    ProtectedRegion {
        start,
        end,
        content: &text[start..end],
        kind,
    }
}

/// Locate table blocks (only when `preserve_tables` is set) and fenced code
/// blocks in `text`.
///
/// A fence runs from a line starting with three backticks to the next such
/// line; an unclosed fence protects nothing. Rows inside a fence are never
/// treated as table rows, so regions never overlap.
pub(crate) fn locate_protected_regions(text: &str, preserve_tables: bool) -> ProtectedRegions<'_> {
    let lines: Vec<Line<'_>> = lines_with_offsets(text).collect();

    let mut code_fences = Vec::new();
    let mut fenced = vec![false; lines.len()];
    let mut open: Option<usize> = None;
    for (i, line) in lines.iter().enumerate() {
        if !is_fence_line(line.text()) {
            continue;
        }
        match open.take() {
            None => open = Some(i),
            Some(o) => {
                code_fences.push(region(text, lines[o].start, line.end(), RegionKind::CodeFence));
                fenced[o..=i].iter_mut().for_each(|f| *f = true);
            }
        }
    }

    let mut tables = Vec::new();
    if preserve_tables {
        let mut run: Option<(usize, usize)> = None;
        for (i, line) in lines.iter().enumerate() {
            if !fenced[i] && is_table_line(line.text()) {
                let start = run.map(|(s, _)| s).unwrap_or(line.start);
                run = Some((start, line.end()));
            } else if let Some((s, e)) = run.take() {
                tables.push(region(text, s, e, RegionKind::Table));
            }
        }
        if let Some((s, e)) = run {
            tables.push(region(text, s, e, RegionKind::Table));
        }
    }

    let mut regions = code_fences;
    regions.extend(tables);
    regions.sort_by_key(|r| r.start);
    ProtectedRegions { regions }
}
