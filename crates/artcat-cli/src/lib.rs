//! Command-line adapter for artcat.
//!
//! Parses arguments with clap, wires the catalog in [`bootstrap`] and hands
//! each subcommand to a handler that talks to [`artcat_core::AppCore`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use image as _;
#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ListArgs};
pub use error::CliError;
pub use parser::Cli;
