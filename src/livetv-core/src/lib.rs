pub mod cache;
pub mod config;
pub mod locator;
pub mod logging;
pub mod models;
pub mod paths;
pub mod provider;
pub mod provider_contract;

pub use cache::LazyCache;
pub use config::{CatalogConfig, Config, ConfigError, LogLevel, LoggingConfig, ValidationError};
pub use locator::Locator;
pub use logging::{init_logging, LoggingError, LoggingGuard};
pub use paths::{AppDirs, DirsError};

pub const APP_NAME: &str = "livetv";
pub const APP_AUTHOR: &str = "Livetv";
pub const APP_QUALIFIER: &str = "io";
