//! # tiapp-xml
//!
//! This library reads and modifies `tiapp.xml`, the application descriptor of
//! a Titanium mobile app. It is used by the `tiapp` and
//! `tiapp-install-module` command-line tools but works on its own for any
//! build tooling that needs to inspect or edit a descriptor.
//!
//! ## Quick Example
//!
//! ```
//! use tiapp_xml::{ConfigDocument, Field};
//!
//! let mut doc = ConfigDocument::parse(
//!     r#"<ti:app xmlns:ti="http://ti.appcelerator.org"><id>com.example</id></ti:app>"#,
//! )
//! .unwrap();
//!
//! doc.set(Field::SdkVersion, "12.2.0.GA").unwrap();
//! doc.set_deployment_target("android", true).unwrap();
//! doc.set_module("ti.map", Some("5.0.0"), Some("android")).unwrap();
//!
//! assert_eq!(doc.get_by_name("sdkVersion").unwrap().as_deref(), Some("12.2.0.GA"));
//! assert_eq!(doc.deployment_target("android"), Some(true));
//! assert!(doc.serialize().unwrap().contains("<module platform=\"android\" version=\"5.0.0\">ti.map</module>"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Document (`document`)**: [`ConfigDocument`] owns the parsed XML tree
//!   and exposes typed accessors for scalar fields, deployment targets,
//!   properties, modules, and plugins. Changes stay in memory until
//!   [`ConfigDocument::write`] is called.
//! - **Fields (`fields`)**: the fixed set of top-level scalar elements, with
//!   camel-cased aliases for dashed names.
//! - **Locator (`locator`)**: finds the nearest ancestor directory holding a
//!   `tiapp.xml`.
//! - **Module registration (`install`)**: the add/remove logic the install
//!   tool applies from command-line arguments or lifecycle-hook environment
//!   variables.
//!
//! ## Execution Flow
//!
//! The command-line tools follow the same steps:
//!
//! 1.  **Locate**: walk up from the working directory to find `tiapp.xml`.
//! 2.  **Load**: parse it into a [`ConfigDocument`].
//! 3.  **Mutate**: apply the requested changes in memory.
//! 4.  **Write**: serialize the whole document and write it back in one pass.

pub mod document;
pub mod error;
pub mod fields;
pub mod install;
pub mod locator;
pub mod logging;
mod xml;

#[cfg(test)]
mod document_proptest;

pub use document::{
    ConfigDocument, DeploymentTargets, Item, ItemKind, ModuleOptions, Property, PropertyType,
    PropertyValue,
};
pub use error::{Error, Result};
pub use fields::Field;
pub use locator::{find_config_file, find_config_root, CONFIG_FILENAME};
