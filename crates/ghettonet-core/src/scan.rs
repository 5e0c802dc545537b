//! Block extraction: a two-state scanner over normalized lines.
//!
//! The scanner walks the document once, lazily, and emits either
//! pass-through text (everything outside `### BEGIN GHETTONET` /
//! `### END GHETTONET` markers) or parsed entries. Marker lines
//! themselves are consumed.
//!
//! Failure policy: in lenient mode a malformed group, trailing residue
//! before an end marker, or a missing end marker is warned about and
//! discarded; in strict mode each aborts the scan. After a failed group
//! the scanner always drops back to [`State::Outside`] — the rest of an
//! untrusted block reads as ordinary surrounding text.

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::normalize;
use crate::parse;

/// Scanner position relative to block markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Accumulating pass-through text; a begin marker opens a block.
    Outside,
    /// Accumulating candidate entry lines; an end marker closes the block.
    Inside,
}

/// Controls the failure policy of a scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Abort on malformed groups, trailing residue and missing end
    /// markers instead of warning and recovering.
    pub strict: bool,
}

impl ParseOptions {
    /// Options that abort on any recoverable defect.
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// One unit of scanner output.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanUnit {
    /// Document text outside any block, in source order.
    Text(Vec<String>),
    /// A successfully parsed entry from inside a block.
    Entry(Entry),
}

/// Lazy single-pass scanner over an already-normalized line sequence.
///
/// Yields `Result<ScanUnit>`; after the first error the iterator is
/// fused (strict-mode aborts are terminal).
pub struct Scanner<I> {
    lines: I,
    options: ParseOptions,
    state: State,
    buffer: Vec<String>,
    done: bool,
}

impl<I> Scanner<I>
where
    I: Iterator<Item = String>,
{
    /// Creates a scanner over normalized lines.
    pub fn new(lines: I, options: ParseOptions) -> Self {
        Self {
            lines,
            options,
            state: State::Outside,
            buffer: Vec::new(),
            done: false,
        }
    }

    /// Handles buffered residue when a block closes or the input ends.
    /// Non-blank residue is trailing text: fatal in strict mode, a
    /// warning in lenient mode, discarded either way.
    fn discard_residue(&mut self) -> Result<()> {
        let residue = std::mem::take(&mut self.buffer);
        if residue.iter().all(String::is_empty) {
            return Ok(());
        }
        let text = residue.join("\n");
        if self.options.strict {
            return Err(Error::TrailingText { text });
        }
        tracing::warn!("Ignoring text:\n{text}");
        Ok(())
    }

    /// A line that is neither blank, comment nor date completes the
    /// current group (including itself); the group parses immediately.
    /// On failure the scanner falls back to [`State::Outside`].
    fn complete_group(&mut self, line: String) -> Result<Option<Entry>> {
        self.buffer.push(line);
        let group = std::mem::take(&mut self.buffer);
        match parse::parse_group(&group) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                self.state = State::Outside;
                if self.options.strict {
                    Err(e)
                } else {
                    tracing::warn!("Discarding malformed block: {e}");
                    Ok(None)
                }
            }
        }
    }

    /// Handles end of input. Inside a block this is a missing end
    /// marker; outside, any buffered text flushes as one final unit.
    fn finish(&mut self) -> Option<Result<ScanUnit>> {
        self.done = true;
        match self.state {
            State::Outside => {
                let text = std::mem::take(&mut self.buffer);
                (!text.is_empty()).then_some(Ok(ScanUnit::Text(text)))
            }
            State::Inside => {
                if let Err(e) = self.discard_residue() {
                    return Some(Err(e));
                }
                if self.options.strict {
                    Some(Err(Error::MissingTerminator))
                } else {
                    tracing::warn!("Missing END GHETTONET");
                    None
                }
            }
        }
    }
}

impl<I> Iterator for Scanner<I>
where
    I: Iterator<Item = String>,
{
    type Item = Result<ScanUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let Some(line) = self.lines.next() else {
                return self.finish();
            };
            match self.state {
                State::Outside => {
                    if parse::is_begin_marker(&line) {
                        self.state = State::Inside;
                        let text = std::mem::take(&mut self.buffer);
                        if !text.is_empty() {
                            return Some(Ok(ScanUnit::Text(text)));
                        }
                    } else {
                        self.buffer.push(line);
                    }
                }
                State::Inside => {
                    if parse::is_end_marker(&line) {
                        self.state = State::Outside;
                        match self.discard_residue() {
                            Ok(()) => {}
                            Err(e) => {
                                self.done = true;
                                return Some(Err(e));
                            }
                        }
                    } else if parse::is_comment_or_blank(&line) {
                        // date lines are #-prefixed and accumulate here too
                        self.buffer.push(line);
                    } else {
                        match self.complete_group(line) {
                            Ok(Some(entry)) => return Some(Ok(ScanUnit::Entry(entry))),
                            Ok(None) => {}
                            Err(e) => {
                                self.done = true;
                                return Some(Err(e));
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Normalizes raw document text and scans it in one step.
pub fn parse_text(text: &str, options: ParseOptions) -> Scanner<std::vec::IntoIter<String>> {
    Scanner::new(normalize::normalize(text).into_iter(), options)
}

/// Collects every successfully parsed entry from raw document text,
/// dropping pass-through units.
///
/// # Errors
///
/// Propagates the first scan error (strict mode only produces errors;
/// lenient mode recovers internally).
pub fn parse_entries(text: &str, options: ParseOptions) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for unit in parse_text(text, options) {
        if let ScanUnit::Entry(entry) = unit? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lenient(text: &str) -> Vec<ScanUnit> {
        parse_text(text, ParseOptions::default())
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn plain_text_is_one_pass_through_unit() {
        let units = lenient("a\nb");
        assert_eq!(
            units,
            vec![ScanUnit::Text(vec!["a".to_string(), "b".to_string()])]
        );
    }

    #[test]
    fn simple_block_yields_one_entry() {
        let units = lenient(
            "### BEGIN GHETTONET\n# comment\n\n## DATE 2010-12-04\n127.0.0.1 wikileaks.org\n### END GHETTONET",
        );
        assert_eq!(units.len(), 1);
        let ScanUnit::Entry(entry) = &units[0] else {
            panic!("expected an entry, got {units:?}");
        };
        assert_eq!(entry.address, "127.0.0.1");
        assert_eq!(entry.names, vec!["wikileaks.org".to_string()]);
        assert_eq!(entry.comments, vec!["# comment".to_string(), String::new()]);
    }

    #[test]
    fn marker_lines_are_consumed() {
        let units = lenient("before\n### BEGIN GHETTONET\n1.2.3.4 a\n### END GHETTONET\nafter");
        assert_eq!(
            units,
            vec![
                ScanUnit::Text(vec!["before".to_string()]),
                ScanUnit::Entry(Entry::new("1.2.3.4", vec!["a".to_string()])),
                ScanUnit::Text(vec!["after".to_string()]),
            ]
        );
    }

    #[test]
    fn several_entries_per_block() {
        let units = lenient("### BEGIN GHETTONET\n1.2.3.4 a\n5.6.7.8 b\n### END GHETTONET");
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn markup_bearing_address_line_parses() {
        let text = "### BEGIN GHETTONET\n<span>127.0.0.1 <a href=\"\">localhost</a></span>\n### END GHETTONET";
        let entries = parse_entries(text, ParseOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].address, "127.0.0.1");
        assert_eq!(entries[0].names, vec!["localhost".to_string()]);
    }

    #[test]
    fn malformed_group_falls_back_to_outside() {
        // "garbage" completes a group with no address; the block is no
        // longer trusted, so the following address line reads as text.
        let text = "### BEGIN GHETTONET\ngarbage$\n1.2.3.4 a\n### END GHETTONET";
        let units = lenient(text);
        assert_eq!(
            units,
            vec![ScanUnit::Text(vec![
                "1.2.3.4 a".to_string(),
                "### END GHETTONET".to_string()
            ])]
        );
    }

    #[test]
    fn malformed_group_aborts_in_strict_mode() {
        let text = "### BEGIN GHETTONET\ngarbage$\n### END GHETTONET";
        let mut scanner = parse_text(text, ParseOptions::strict());
        assert!(matches!(
            scanner.next(),
            Some(Err(Error::MissingAddress { .. }))
        ));
        assert!(scanner.next().is_none(), "scanner must fuse after an error");
    }

    #[test]
    fn trailing_text_before_end_marker_is_discarded_when_lenient() {
        let text = "### BEGIN GHETTONET\n# dangling comment\n### END GHETTONET";
        let units = lenient(text);
        assert!(units.is_empty());
    }

    #[test]
    fn trailing_text_before_end_marker_aborts_when_strict() {
        let text = "### BEGIN GHETTONET\n# dangling comment\n### END GHETTONET";
        let result: Result<Vec<_>> = parse_text(text, ParseOptions::strict()).collect();
        assert!(matches!(result, Err(Error::TrailingText { .. })));
    }

    #[test]
    fn blank_residue_before_end_marker_is_fine() {
        let text = "### BEGIN GHETTONET\n1.2.3.4 a\n\n\n### END GHETTONET";
        let result: Result<Vec<_>> = parse_text(text, ParseOptions::strict()).collect();
        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn missing_end_marker_warns_when_lenient() {
        let units = lenient("### BEGIN GHETTONET\n1.2.3.4 a");
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn missing_end_marker_aborts_when_strict() {
        let result: Result<Vec<_>> =
            parse_text("### BEGIN GHETTONET\n1.2.3.4 a", ParseOptions::strict()).collect();
        assert!(matches!(result, Err(Error::MissingTerminator)));
    }

    #[test]
    fn begin_marker_inside_block_reads_as_comment() {
        let text =
            "### BEGIN GHETTONET\n### BEGIN GHETTONET\n1.2.3.4 a\n### END GHETTONET";
        let entries = parse_entries(text, ParseOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].comments,
            vec!["### BEGIN GHETTONET".to_string()]
        );
    }

    #[test]
    fn empty_input_is_one_empty_text_unit() {
        // normalization of "" still produces one empty line
        let units = lenient("");
        assert_eq!(units, vec![ScanUnit::Text(vec![String::new()])]);
    }
}
