//! `logfacade-config`: log configuration for the logfacade logger.
//!
//! Provides:
//! - Typed schema for `config/log.yaml`
//! - Permissive loading (read or parse failure means "not configured")
//! - Default substitution for unset rotation fields

pub mod defaults;
pub mod io;
pub mod schema;

// Re-export most-used items at crate root.
pub use defaults::{
    apply_rotation_defaults, DEFAULT_MAX_AGE_DAYS, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_SIZE_MB,
};
pub use io::{load, load_config, try_load, CONFIG_FILE_PATH};
pub use schema::LogConfig;
