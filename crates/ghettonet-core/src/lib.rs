//! Block parsing and merging for GhettoNet host records.
//!
//! GhettoNet data is machine-readable host-address records embedded as
//! marked text blocks inside arbitrary documents — hosts files, emails,
//! web pages:
//!
//! ```text
//! ### BEGIN GHETTONET
//!
//! # wikileaks.ch from DNS
//! ## DATE 2010-12-04
//! 213.251.145.96    www.wikileaks.org wikileaks.org
//!
//! ### END GHETTONET
//! ```
//!
//! This crate extracts those records and reconciles records collected
//! from multiple sources into one conflict-free set keyed by address:
//!
//! - [`normalize`] — line splitting and markup stripping
//! - [`scan`] — the block scanner, a lazy two-state machine
//! - [`parse`] — line classification and entry decoding
//! - [`merge`] — the strategy-pipelined merge engine
//! - [`comments`] — duplicate-free comment-set union
//! - [`format`] — rendering entries back to text
//!
//! Scanning is pull-based and lazy; merging requires its whole input up
//! front. Everything is synchronous and single-threaded.

pub mod comments;
pub mod entry;
pub mod error;
pub mod format;
pub mod merge;
pub mod normalize;
pub mod parse;
pub mod scan;

pub use entry::{Entry, EntryDate};
pub use error::{Error, Result};
pub use format::{format_entry, render_document, write_document};
pub use merge::{DEFAULT_STRATEGIES, MergeOptions, MergeStrategy, merge, merge_with};
pub use scan::{ParseOptions, ScanUnit, Scanner, parse_entries, parse_text};
