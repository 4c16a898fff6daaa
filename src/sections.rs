//! Section slicing for quest pages.
//!
//! Two page shapes come through here: raw wiki HTML (sliced by a fixed
//! heading tag, then tag-stripped) and already-converted markdown (sliced by
//! `##` headings). Both return None when the page has no description, which
//! the pipeline treats as "skip this file", not as an error.

use std::sync::LazyLock;

use regex::Regex;

pub const DESCRIPTION: &str = "Description";
pub const PROGRESS: &str = "Progress";
pub const COMPLETION: &str = "Completion";

/// Wiki markdown renders some quest headings as links, e.g.
/// `## [Progress](javascript:)`. Fold those back to the plain form before
/// slicing.
static LINKED_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^## \[(Description|Progress|Completion)\]\([^)]*\)").unwrap()
});

/// Slice the section opened by `heading_marker` out of raw HTML and strip
/// its markup. The slice runs from just after the marker to the next
/// occurrence of `next_heading`, or to the end of the document when no
/// further heading exists.
pub fn html_section(raw: &str, heading_marker: &str, next_heading: &str) -> Option<String> {
    let start = raw.find(heading_marker)? + heading_marker.len();
    let body = &raw[start..];
    let end = body.find(next_heading).unwrap_or(body.len());
    Some(strip_tags(&body[..end]))
}

/// Remove `<...>` spans in a single pass, copying everything outside them.
/// An opening `<` with no closing `>` ends the scan with the remainder kept
/// verbatim, so malformed markup cannot hang the stripper.
pub fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Extract the three quest sections from markdown, concatenated in the fixed
/// order Description, Progress, Completion. Description is mandatory: a page
/// without it yields None. Progress and Completion are skipped silently when
/// absent.
pub fn markdown_sections(raw: &str) -> Option<String> {
    let normalized = LINKED_HEADING_RE.replace_all(raw, "## $1");
    let mut out = markdown_section(&normalized, DESCRIPTION)?;
    for name in [PROGRESS, COMPLETION] {
        if let Some(body) = markdown_section(&normalized, name) {
            out.push_str(&body);
        }
    }
    Some(out)
}

enum Scan {
    Searching,
    InSection,
    Done,
}

/// Line-oriented scan for one section: the body is every line strictly
/// between the heading line and the next `##` heading (end of document when
/// none follows), trimmed of surrounding whitespace.
fn markdown_section(raw: &str, name: &str) -> Option<String> {
    let heading = format!("## {name}");
    let mut state = Scan::Searching;
    let mut body: Vec<&str> = Vec::new();
    for line in raw.lines() {
        state = match state {
            Scan::Searching if line.starts_with(&heading) => Scan::InSection,
            Scan::Searching => Scan::Searching,
            Scan::InSection if line.starts_with("##") => Scan::Done,
            Scan::InSection => {
                body.push(line);
                Scan::InSection
            }
            Scan::Done => break,
        };
    }
    match state {
        Scan::Searching => None,
        _ => Some(body.join("\n").trim().to_string()),
    }
}
