//! Formantic CLI library.
//!
//! This crate provides the pieces behind the `formantic` binary: command
//! implementations, configuration loading, diphone voice directories, and
//! logging setup.

pub mod commands;
pub mod logging;
pub mod settings;
pub mod voice_dir;
