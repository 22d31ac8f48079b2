//! # Listing Command Implementation
//!
//! This module implements the `modules` and `plugins` subcommands, which list
//! the entries of the matching group in document order.
//!
//! ## Functionality
//!
//! - **Plain Listing**: one line per entry, `id`, then version and platform
//!   when present.
//! - **Platform Filtering**: show only entries for one platform.
//! - **JSON Output**: machine-readable listing for scripts.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use tiapp_xml::{Item, ItemKind};

use crate::cli::DescriptorArgs;

/// List entries of an item group
#[derive(Args, Debug, Default)]
pub struct LsArgs {
    /// Only show entries for this platform
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Print entries as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Show only the total count of entries
    #[arg(long, conflicts_with = "json")]
    pub count: bool,
}

/// Execute the `modules` or `plugins` command.
pub fn execute(args: LsArgs, descriptor: &DescriptorArgs, kind: ItemKind) -> Result<()> {
    let doc = descriptor.load()?;
    let items = filter_items(doc.items(kind), args.platform.as_deref());

    if args.count {
        println!("{}", items.len());
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        eprintln!("No {} found", kind.container());
    } else {
        for item in &items {
            println!("{}", format_item(item));
        }
    }
    Ok(())
}

fn filter_items(items: Vec<Item>, platform: Option<&str>) -> Vec<Item> {
    match platform {
        Some(platform) => items
            .into_iter()
            .filter(|item| item.platform.as_deref() == Some(platform))
            .collect(),
        None => items,
    }
}

fn format_item(item: &Item) -> String {
    let mut line = item.id.clone();
    if let Some(version) = &item.version {
        line.push_str(&format!("  version={}", version));
    }
    if let Some(platform) = &item.platform {
        line.push_str(&format!("  platform={}", platform));
    }
    line
}
