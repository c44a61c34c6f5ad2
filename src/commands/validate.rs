//! The `validate` command: load, merge, and resolve a config document.

use super::load_merged;
use crate::cli::ConfigArgs;
use crate::error::Result;
use crate::registry::{builtin, resolve_tree};

pub fn cmd_validate(args: ConfigArgs) -> Result<()> {
    let merged = load_merged(&args)?;
    let resolved = resolve_tree(builtin(), &merged)?;

    println!(
        "Config is well-formed ({} component reference{} resolved).",
        resolved,
        if resolved == 1 { "" } else { "s" }
    );
    Ok(())
}
