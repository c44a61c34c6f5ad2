//! Error types for the kiln CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Resolution errors embed the offending dotted path verbatim so callers and
//! tests can match on it.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kiln operations.
///
/// Each variant maps to a specific exit code. Command-line and config-authoring
/// mistakes are deterministic input errors and are never retried.
#[derive(Error, Debug)]
pub enum KilnError {
    /// User provided invalid input: a malformed override token, a bad sample
    /// column, or a reserved key holding the wrong shape of value.
    #[error("{0}")]
    UserError(String),

    /// The config document could not be read or parsed.
    #[error("{0}")]
    ConfigError(String),

    /// A component path attempted relative addressing.
    #[error("Relative imports are not supported, got '{path}'. Component paths must be fully qualified.")]
    RelativeImport {
        /// The offending dotted path, verbatim.
        path: String,
    },

    /// No registered module or attribute matches the dotted path.
    #[error("Error loading '{path}': {reason}")]
    ComponentNotFound {
        /// The unresolved dotted path, verbatim.
        path: String,
        /// Which step of the lookup failed.
        reason: LookupReason,
    },

    /// The path resolved, but not to a component of the expected kind.
    #[error("Invalid {expected} class '{name}'")]
    InvalidKind {
        /// Name of the expected capability category.
        expected: String,
        /// Name of the entry that was actually found.
        name: String,
    },
}

/// Which step of a dotted-path lookup failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupReason {
    /// No registered module matches any prefix of the path.
    #[error("no registered module matches any prefix of the path")]
    NoModule,

    /// A module or component was found, but the next attribute is missing.
    #[error("'{container}' has no attribute '{attribute}'")]
    MissingAttribute {
        /// Dotted path of the module or component that was searched.
        container: String,
        /// The attribute that was not found in it.
        attribute: String,
    },
}

impl KilnError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            KilnError::UserError(_) => exit_codes::USER_ERROR,
            KilnError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            KilnError::RelativeImport { .. }
            | KilnError::ComponentNotFound { .. }
            | KilnError::InvalidKind { .. } => exit_codes::RESOLUTION_FAILURE,
        }
    }
}

/// Result type alias for kiln operations.
pub type Result<T> = std::result::Result<T, KilnError>;
