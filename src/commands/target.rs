//! # Target Command Implementation
//!
//! This module implements the `target` subcommand for deployment targets.
//!
//! - `tiapp target` prints every target as `device=true|false`.
//! - `tiapp target android` prints one flag.
//! - `tiapp target android false` sets one flag and writes the descriptor.

use anyhow::{bail, Result};
use clap::Args;

use crate::cli::DescriptorArgs;

/// Show or change deployment targets
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Device name (e.g. android, iphone, ipad)
    #[arg(value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// New value for the target
    #[arg(value_name = "ENABLED", requires = "platform", action = clap::ArgAction::Set)]
    pub enabled: Option<bool>,
}

/// Execute the `target` command.
pub fn execute(args: TargetArgs, descriptor: &DescriptorArgs) -> Result<()> {
    let mut doc = descriptor.load()?;

    match (args.platform, args.enabled) {
        (Some(platform), Some(enabled)) => {
            doc.set_deployment_target(&platform, enabled)?;
            doc.write(None)?;
        }
        (Some(platform), None) => match doc.deployment_target(&platform) {
            Some(enabled) => println!("{}", enabled),
            None => bail!("No deployment target for '{}'", platform),
        },
        (None, _) => match doc.deployment_targets() {
            Some(targets) => {
                for (device, enabled) in targets {
                    println!("{}={}", device, enabled);
                }
            }
            None => bail!("No <deployment-targets> element"),
        },
    }
    Ok(())
}
