//! Error types for ghettonet-core

/// Result type for ghettonet-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing blocks or merging entries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An entry group contained no address line
    #[error("No address in:\n{block}")]
    MissingAddress { block: String },

    /// An entry group had an address line but no name tokens
    #[error("No names in:\n{block}")]
    MissingNames { block: String },

    /// A second date line appeared in one entry group
    #[error("Duplicate date: {line}")]
    DuplicateDate { line: String },

    /// A line that looks like a date failed full date validation
    #[error("Could not parse date: {line}")]
    UnparsableDate { line: String },

    /// A token on an address line is not a valid hostname token
    #[error("Invalid name token: {token}")]
    InvalidName { token: String },

    /// Non-blank text was left over immediately before an end marker
    #[error("Unexpected text:\n{text}")]
    TrailingText { text: String },

    /// Input ended while still inside a block
    #[error("Missing END GHETTONET")]
    MissingTerminator,

    /// One name is claimed by genuinely different addresses at the same
    /// priority and strict merging was requested
    #[error("Conflicting addresses ({}) for {name}", addresses.join(","))]
    AddressConflict {
        name: String,
        addresses: Vec<String>,
    },

    /// A merge bucket survived the whole reduction pipeline with more
    /// than one entry. Indicates a logic defect, never expected.
    #[error("Multiple entries ({remaining}) left for {name} after merge")]
    BucketNotReduced { name: String, remaining: usize },
}

impl Error {
    /// Returns true for failures lenient parsing warns about and recovers
    /// from: malformed entry groups, trailing text, a missing end marker.
    /// Fatal kinds (merge ambiguity, pipeline invariant violations)
    /// return false.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingAddress { .. }
                | Self::MissingNames { .. }
                | Self::DuplicateDate { .. }
                | Self::UnparsableDate { .. }
                | Self::InvalidName { .. }
                | Self::TrailingText { .. }
                | Self::MissingTerminator
        )
    }
}
