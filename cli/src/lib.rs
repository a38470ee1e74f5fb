//! prompt-debugger CLI library, split out of the binary so commands can be unit tested.

pub mod app;
pub mod commands;
pub mod error;
pub mod utils;
