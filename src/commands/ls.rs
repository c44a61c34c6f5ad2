//! The `ls` command: list the built-in registry.

use crate::error::Result;
use crate::registry::builtin;

pub fn cmd_ls() -> Result<()> {
    for module in builtin().modules() {
        println!("{}", module.path());
        for component in module.components() {
            println!("  {:<36} {}", component.name(), component.kind());
        }
    }
    Ok(())
}
