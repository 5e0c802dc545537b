//! Entry-group parsing: line classification and decoding.
//!
//! A group is the run of lines the scanner accumulated for one candidate
//! entry: comments, blanks, at most one date line, and at least one
//! address line. The grammar here must match other GhettoNet
//! implementations byte-for-byte.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::entry::{Entry, EntryDate};
use crate::error::{Error, Result};

fn line_pattern(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("Invalid line pattern")
}

/// Begin marker: two-or-more `#`, optional whitespace, BEGIN, optional
/// whitespace, GHETTONET. Case-insensitive, so `##beginghettonet`
/// matches too.
static BEGIN: LazyLock<Regex> = LazyLock::new(|| line_pattern(r"^\s*#{2,}\s*BEGIN\s*GHETTONET"));

/// End marker, same shape with END.
static END: LazyLock<Regex> = LazyLock::new(|| line_pattern(r"^\s*#{2,}\s*END\s*GHETTONET"));

/// Full date grammar: `## DATE yyyy-m[m]-d[d]`, optional ` h[h]:m[m][:s[s]]`,
/// optional trailing free text.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    line_pattern(
        r"^\s*#{2,}\s*DATE\s*(?P<year>\d{4})-(?P<month>\d\d?)-(?P<day>\d\d?)(\s+(?P<hour>\d\d?):(?P<min>\d\d?)(:(?P<sec>\d\d?))?)?(\s+(?P<extra>.*))?$",
    )
});

/// Looser prefix used to classify a line as date-like before full
/// validation, so bad dates get a specific diagnostic.
static POSSIBLE_DATE: LazyLock<Regex> = LazyLock::new(|| line_pattern(r"^\s*#{2,}\s*DATE"));

/// Empty after trimming, or `#`-leading.
static COMMENT_OR_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:#.*)?$").expect("Invalid comment pattern"));

/// Leading dotted-numeric address token: four unbounded digit runs.
/// Deliberately loose, no range check.
static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.\d+\.\d+\.\d+)\s*(.*)$").expect("Invalid address pattern"));

/// A hostname token: letters, digits and hyphens, dot-joined.
static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*$").expect("Invalid name pattern")
});

/// Returns true if the line is a block begin marker.
#[must_use]
pub fn is_begin_marker(line: &str) -> bool {
    BEGIN.is_match(line)
}

/// Returns true if the line is a block end marker.
#[must_use]
pub fn is_end_marker(line: &str) -> bool {
    END.is_match(line)
}

/// Returns true if the line is empty or a `#` comment (date lines match
/// too; classify those first).
#[must_use]
pub fn is_comment_or_blank(line: &str) -> bool {
    COMMENT_OR_BLANK.is_match(line)
}

/// Returns true if the line carries the `## DATE` prefix, whether or not
/// the rest of it parses.
#[must_use]
pub fn is_possible_date(line: &str) -> bool {
    POSSIBLE_DATE.is_match(line)
}

/// Parses a full date line into an [`EntryDate`].
///
/// Missing hour, minute and second default to zero; trailing free text is
/// captured verbatim.
///
/// # Errors
///
/// Returns [`Error::UnparsableDate`] when the line fails the full grammar
/// or encodes an impossible calendar date.
pub fn parse_date_line(line: &str) -> Result<EntryDate> {
    let bad_date = || Error::UnparsableDate {
        line: line.to_string(),
    };
    let captures = DATE.captures(line).ok_or_else(bad_date)?;
    let part = |name: &str| -> u32 {
        captures
            .name(name)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };

    let year: i32 = captures["year"].parse().map_err(|_| bad_date())?;
    let timestamp = chrono::NaiveDate::from_ymd_opt(year, part("month"), part("day"))
        .and_then(|d| d.and_hms_opt(part("hour"), part("min"), part("sec")))
        .ok_or_else(bad_date)?;

    let extra = captures
        .name("extra")
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty());
    Ok(EntryDate { timestamp, extra })
}

/// Extracted pieces of one address line.
struct AddressLine {
    address: String,
    names: Vec<String>,
}

/// Parses `<address> <name> <name> ...`. Returns `None` when the line has
/// no leading address token at all (the group-level missing-address
/// diagnostic is the caller's).
///
/// # Errors
///
/// Returns [`Error::InvalidName`] when a token after the address is not a
/// valid hostname token.
fn parse_address_line(line: &str) -> Result<Option<AddressLine>> {
    let Some(captures) = ADDRESS.captures(line) else {
        return Ok(None);
    };
    let address = captures[1].to_string();
    let mut names = Vec::new();
    for token in captures[2].split_whitespace() {
        if !NAME.is_match(token) {
            return Err(Error::InvalidName {
                token: token.to_string(),
            });
        }
        names.push(token.to_lowercase());
    }
    Ok(Some(AddressLine { address, names }))
}

/// Decodes one accumulated line-group into an [`Entry`].
///
/// Classification, in order per line: date-like lines must parse fully
/// and may appear once; comment-or-blank lines are kept verbatim;
/// anything else is an address line. A second address line contributes
/// names only — the first address stays authoritative.
///
/// # Errors
///
/// Returns a block-local error for a duplicate or unparsable date, an
/// invalid name token, a group with no address, or a group with no names.
pub fn parse_group(lines: &[String]) -> Result<Entry> {
    let mut address: Option<String> = None;
    let mut names = Vec::new();
    let mut date = None;
    let mut comments = Vec::new();

    for line in lines {
        if is_possible_date(line) {
            if date.is_some() {
                return Err(Error::DuplicateDate {
                    line: line.clone(),
                });
            }
            date = Some(parse_date_line(line)?);
        } else if is_comment_or_blank(line) {
            comments.push(line.clone());
        } else if let Some(parsed) = parse_address_line(line)? {
            address.get_or_insert(parsed.address);
            names.extend(parsed.names);
        }
    }

    let block = || lines.join("\n");
    let Some(address) = address else {
        return Err(Error::MissingAddress { block: block() });
    };
    if names.is_empty() {
        return Err(Error::MissingNames { block: block() });
    }
    Ok(Entry {
        address,
        names,
        date,
        comments,
    })
}
