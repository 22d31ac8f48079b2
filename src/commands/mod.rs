//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `tiapp`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` plus the shared
//!   descriptor location and performs the command's logic.
//!
//! Commands that change the descriptor load it, mutate it through the
//! `tiapp_xml` library, and write it back once at the end.

pub mod completions;
pub mod field;
pub mod install_module;
pub mod ls;
pub mod property;
pub mod target;
pub mod uninstall_module;
