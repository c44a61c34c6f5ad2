//! The `resolve` command: resolve one dotted path against the registry.

use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::registry::{self, Resolved};

pub fn cmd_resolve(args: ResolveArgs) -> Result<()> {
    match args.kind {
        Some(kind) => {
            let component = registry::resolve_checked(&args.path, kind.into())?;
            println!("{} ({})", component.path(), component.kind());
        }
        None => match registry::resolve(&args.path)? {
            Resolved::Module(module) => println!("{} (module)", module.path()),
            Resolved::Component(component) => {
                println!("{} ({})", component.path(), component.kind())
            }
        },
    }
    Ok(())
}
