//! Exit code constants for the kiln CLI.
//!
//! - 0: Success
//! - 1: Usage error (malformed override token, bad input)
//! - 2: Config failure (document unreadable or unparseable)
//! - 3: Resolution failure (relative path, unknown component, kind mismatch)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Usage error: malformed override token or otherwise invalid user input.
pub const USER_ERROR: i32 = 1;

/// Config failure: the document could not be loaded or parsed.
pub const CONFIG_FAILURE: i32 = 2;

/// Resolution failure: a component reference could not be resolved.
pub const RESOLUTION_FAILURE: i32 = 3;
