//! Rendering entries back into the GhettoNet text format.
//!
//! Round-trip contract: rendering an entry and re-parsing the rendered
//! text yields the same address, name set, date (with extra text) and
//! comments, modulo the leading blank comments trimmed here.

use std::io;

use crate::entry::Entry;

/// Opening line of a rendered document.
pub const BEGIN_MARKER: &str = "### BEGIN GHETTONET";
/// Closing line of a rendered document.
pub const END_MARKER: &str = "### END GHETTONET";

/// Renders the comment lines, with leading blanks trimmed (blank
/// separators are re-added when writing a whole document).
fn format_comments(entry: &Entry) -> &[String] {
    let start = entry
        .comments
        .iter()
        .position(|c| !c.trim().is_empty())
        .unwrap_or(entry.comments.len());
    &entry.comments[start..]
}

/// Renders the date line, if the entry has a date.
fn format_date(entry: &Entry) -> Option<String> {
    entry.date.as_ref().map(|date| {
        let mut line = format!("## DATE {}", date.timestamp.format("%Y-%m-%d %H:%M:%S"));
        if let Some(extra) = &date.extra {
            line.push(' ');
            line.push_str(extra);
        }
        line
    })
}

/// Renders the address line: address, four spaces, names space-joined
/// with the longest name first. The sort is stable, so equal-length
/// names keep their order.
fn format_address(entry: &Entry) -> String {
    let mut names: Vec<&str> = entry.names.iter().map(String::as_str).collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));
    format!("{}    {}", entry.address, names.join(" "))
}

/// Renders one entry: comments, then at most one date line, then the
/// address line.
#[must_use]
pub fn format_entry(entry: &Entry) -> String {
    let mut lines: Vec<String> = format_comments(entry).to_vec();
    lines.extend(format_date(entry));
    lines.push(format_address(entry));
    lines.join("\n")
}

/// Writes entries as one complete GhettoNet document, blank-line
/// separated, wrapped in begin/end markers.
///
/// # Errors
///
/// Propagates I/O errors from the writer.
pub fn write_document<W: io::Write>(out: &mut W, entries: &[Entry]) -> io::Result<()> {
    writeln!(out, "{BEGIN_MARKER}")?;
    writeln!(out)?;
    for entry in entries {
        writeln!(out, "{}", format_entry(entry))?;
        writeln!(out)?;
    }
    writeln!(out, "{END_MARKER}")
}

/// Renders entries as one document string.
#[must_use]
pub fn render_document(entries: &[Entry]) -> String {
    let mut buffer = Vec::new();
    write_document(&mut buffer, entries).expect("writing to a Vec cannot fail");
    String::from_utf8(buffer).expect("rendered document is UTF-8")
}
