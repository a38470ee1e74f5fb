//! Prompt structure capture for chat hosts: prune empty fields, log grouped
//! dumps to the console, and keep the debugger's four flags persisted.

pub mod api;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod hooks;
pub mod logger;
pub mod prune;
pub mod settings;
