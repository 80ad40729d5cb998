// src/commands/mod.rs
//! Command handlers for the plugin installer CLI

mod plugin;

pub use plugin::{InstallArgs, cmd_paths, cmd_plugin_install};
