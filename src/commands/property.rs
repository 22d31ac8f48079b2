//! # Property Command Implementation
//!
//! This module implements the `property` subcommand for
//! `<property name="..." type="...">` entries.
//!
//! ## Functionality
//!
//! - **List**: with no name, print every property as `name (type) = value`.
//! - **Read**: with a name, print the converted value.
//! - **Write**: with a name and value, create or update the property,
//!   optionally setting its `--type`.
//! - **Remove**: `--remove` deletes the property if present.

use anyhow::{bail, Result};
use clap::Args;

use tiapp_xml::PropertyType;

use crate::cli::DescriptorArgs;

/// Show, set, or remove a property
#[derive(Args, Debug)]
pub struct PropertyArgs {
    /// Property name
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// New value for the property
    #[arg(value_name = "VALUE", requires = "name", conflicts_with = "remove")]
    pub value: Option<String>,

    /// Declared type to store with the value (string, bool, int, double)
    #[arg(short = 't', long = "type", value_name = "TYPE", requires = "value")]
    pub ty: Option<PropertyType>,

    /// Remove the property
    #[arg(long, requires = "name")]
    pub remove: bool,
}

/// Execute the `property` command.
pub fn execute(args: PropertyArgs, descriptor: &DescriptorArgs) -> Result<()> {
    let mut doc = descriptor.load()?;

    let Some(name) = args.name else {
        for property in doc.properties() {
            println!("{} ({}) = {}", property.name, property.ty, property.value);
        }
        return Ok(());
    };

    if args.remove {
        doc.remove_property(&name)?;
        doc.write(None)?;
    } else if let Some(value) = args.value {
        doc.set_property(&name, value, args.ty)?;
        doc.write(None)?;
    } else {
        match doc.property(&name) {
            Some(value) => println!("{}", value),
            None => bail!("Property '{}' is not set", name),
        }
    }
    Ok(())
}
