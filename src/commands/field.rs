//! # Field Command Implementation
//!
//! This module implements the `get` and `set` subcommands for top-level
//! scalar fields such as `id`, `version`, or `sdk-version`. Dashed names may
//! also be given in camel case (`sdkVersion`).

use anyhow::{bail, Result};
use clap::Args;

use tiapp_xml::Field;

use crate::cli::DescriptorArgs;

/// Print a top-level field
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Field name (e.g. id, version, sdk-version or sdkVersion)
    #[arg(value_name = "FIELD")]
    pub field: Field,
}

/// Set a top-level field
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Field name (e.g. id, version, sdk-version or sdkVersion)
    #[arg(value_name = "FIELD")]
    pub field: Field,

    /// New text for the field
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Execute the `get` command. Fails when the field is absent.
pub fn execute_get(args: GetArgs, descriptor: &DescriptorArgs) -> Result<()> {
    let doc = descriptor.load()?;
    match doc.get(args.field) {
        Some(value) => println!("{}", value),
        None => bail!("<{}> is not set", args.field),
    }
    Ok(())
}

/// Execute the `set` command.
pub fn execute_set(args: SetArgs, descriptor: &DescriptorArgs) -> Result<()> {
    let mut doc = descriptor.load()?;
    doc.set(args.field, &args.value)?;
    doc.write(None)?;
    Ok(())
}
