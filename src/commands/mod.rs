//! Command implementations for kiln.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod cat;
mod ls;
mod resolve;
mod validate;

use crate::cli::{Command, ConfigArgs};
use crate::config::{merge_overrides, ConfigTree};
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Validate(args) => validate::cmd_validate(args),
        Command::Cat(args) => cat::cmd_cat(args),
        Command::Resolve(args) => resolve::cmd_resolve(args),
        Command::Ls => ls::cmd_ls(),
    }
}

/// Load the config document and apply command-line overrides.
fn load_merged(args: &ConfigArgs) -> Result<ConfigTree> {
    let base = ConfigTree::load(&args.config)?;
    merge_overrides(&base, &args.overrides)
}
