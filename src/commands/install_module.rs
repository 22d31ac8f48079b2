//! # Install Module Command Implementation
//!
//! This module implements the `install-module` subcommand, which registers a
//! `<module>` entry in the nearest `tiapp.xml`.
//!
//! ## Functionality
//!
//! - **Explicit mode**: `tiapp install-module <ID> [PLATFORM] [VERSION]`
//!   replaces any entry for `(ID, PLATFORM)` with the given version.
//! - **Lifecycle-hook mode**: with no arguments, the package name, version,
//!   and declared platforms are read from the environment npm sets for
//!   package scripts, and one entry is registered per platform.
//!
//! The descriptor is written once after all entries are registered.

use anyhow::Result;
use clap::Args;
use console::style;

use tiapp_xml::install::{self, HookEnv, InstallRequest};

use crate::cli::DescriptorArgs;

/// Register a module entry in tiapp.xml
#[derive(Args, Debug, Default)]
pub struct InstallModuleArgs {
    /// Module id. Omit to read the package from the npm lifecycle environment
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Platform the module targets (e.g. android, iphone)
    #[arg(value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Module version to pin
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,
}

impl InstallModuleArgs {
    /// Positional arguments in `[id, platform, version]` order, stopping at
    /// the first one not given.
    pub fn positional(&self) -> Vec<String> {
        [&self.id, &self.platform, &self.version]
            .into_iter()
            .map_while(|arg| arg.clone())
            .collect()
    }
}

/// Execute the `install-module` command.
///
/// The request is resolved before the descriptor is searched for, so a call
/// with neither arguments nor lifecycle environment fails without touching
/// the filesystem.
pub fn execute(args: InstallModuleArgs, descriptor: &DescriptorArgs) -> Result<()> {
    let request = InstallRequest::resolve(&args.positional(), &HookEnv::from_env())?;
    let path = descriptor.resolve()?;
    println!("Found tiapp.xml: {}", path.display());

    let registrations = install::install_into(&path, &request)?;
    for registration in &registrations {
        println!("{} Installed module {}", style("✔").green(), registration);
    }
    Ok(())
}
