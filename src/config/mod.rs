//! Configuration model for kiln.
//!
//! This module defines the config tree (a nested string-keyed mapping loaded
//! from a YAML document), the document loader boundary, and the command-line
//! override merge. Component references inside a tree are resolved by the
//! `registry` module.

mod loader;
mod merge;
mod value;


// Re-export public API
pub use merge::{apply_override, merge_overrides, parse_override, parse_overrides, Override};
pub use value::{ConfigTree, ConfigValue, COMPONENT_KEY};
