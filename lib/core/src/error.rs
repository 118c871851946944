//! Error handling foundation for tripwire.
//!
//! Only the shared `Result` alias and the parse errors of core value types
//! live here. Each crate owns its domain errors and layers them onto
//! rootcause reports with `.context()`.

use rootcause::Report;
use std::fmt;

/// Result alias over a rootcause report.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Failure to parse one of the core value types from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A typed id did not carry a valid ULID.
    Id {
        /// Name of the id type being parsed.
        id_type: &'static str,
        /// Why the ULID was rejected.
        reason: String,
    },
    /// A hook event name is not one of the known events.
    UnknownEvent { name: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id { id_type, reason } => write!(f, "failed to parse {id_type}: {reason}"),
            Self::UnknownEvent { name } => write!(f, "unknown hook event: {name}"),
        }
    }
}

impl std::error::Error for ParseError {}
