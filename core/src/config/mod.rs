mod load;
mod types;

pub use load::{get_data_dir, load_default, load_from_path, resolve, LOG_LEVEL_ENV, SETTINGS_PATH_ENV};
pub use types::{AppConfig, ConsoleConfig, LoggingConfig, PruneConfig};
