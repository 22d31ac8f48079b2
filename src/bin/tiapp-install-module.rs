//! # tiapp-install-module
//!
//! Standalone module registration tool meant to be wired into a native module
//! package's npm lifecycle scripts:
//!
//! ```json
//! { "scripts": { "postinstall": "tiapp-install-module" } }
//! ```
//!
//! Run with `<ID> [PLATFORM] [VERSION]` to register one entry explicitly, or
//! with no arguments to register the running package for every platform
//! listed under `titanium.platform` in its `package.json`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use tiapp_xml::find_config_file;
use tiapp_xml::logging::init_logging;
use tiapp_xml::install::{self, HookEnv, InstallRequest};

/// Register a module in the nearest tiapp.xml
#[derive(Parser, Debug)]
#[command(name = "tiapp-install-module")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Module id. Omit to read the package from the npm lifecycle environment
    #[arg(value_name = "ID")]
    id: Option<String>,

    /// Platform the module targets (e.g. android, iphone)
    #[arg(value_name = "PLATFORM")]
    platform: Option<String>,

    /// Module version to pin
    #[arg(id = "module_version", value_name = "VERSION")]
    module_version: Option<String>,

    /// Directory to start searching upward from (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let args: Vec<String> = [cli.id, cli.platform, cli.module_version]
        .into_iter()
        .map_while(|arg| arg)
        .collect();
    let request = InstallRequest::resolve(&args, &HookEnv::from_env())?;

    let start = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let path = find_config_file(&start).with_context(|| {
        format!(
            "Could not find tiapp.xml in directory tree: {}",
            start.display()
        )
    })?;
    println!("Found tiapp.xml: {}", path.display());

    for registration in install::install_into(&path, &request)? {
        println!("Installed module {}", registration);
    }
    Ok(())
}
