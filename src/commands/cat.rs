//! The `cat` command: print the merged config document.

use super::load_merged;
use crate::cli::{CatArgs, OutputFormat};
use crate::error::Result;

pub fn cmd_cat(args: CatArgs) -> Result<()> {
    let merged = load_merged(&args.config)?;

    let rendered = match args.output {
        OutputFormat::Yaml => merged.to_yaml()?,
        OutputFormat::Json => merged.to_json()?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
