pub mod cli;
pub mod debug;
pub mod prune;
pub mod settings;
pub mod watch;
