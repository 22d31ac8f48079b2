//! # Uninstall Module Command Implementation
//!
//! This module implements the `uninstall-module` subcommand, the counterpart
//! of `install-module`. Without platforms it removes only the entry that has
//! no `platform` attribute; platform-specific entries must be named.

use anyhow::Result;
use clap::Args;
use console::style;

use tiapp_xml::install;

use crate::cli::DescriptorArgs;

/// Remove a module entry from tiapp.xml
#[derive(Args, Debug)]
pub struct UninstallModuleArgs {
    /// Module id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Platforms to remove the module for
    #[arg(value_name = "PLATFORM")]
    pub platforms: Vec<String>,
}

/// Execute the `uninstall-module` command.
pub fn execute(args: UninstallModuleArgs, descriptor: &DescriptorArgs) -> Result<()> {
    let mut doc = descriptor.load()?;
    install::uninstall(&mut doc, &args.id, &args.platforms)?;
    doc.write(None)?;

    if args.platforms.is_empty() {
        println!("{} Removed module {}", style("✔").green(), args.id);
    } else {
        println!(
            "{} Removed module {} ({})",
            style("✔").green(),
            args.id,
            args.platforms.join(", ")
        );
    }
    Ok(())
}
