//! Error handling for Railguard.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod flag_error;
pub mod rails_error;
pub mod rollback_error;
pub mod storage_error;
pub mod vault_error;

pub use config_error::ConfigError;
pub use flag_error::FlagError;
pub use rails_error::RailsError;
pub use rollback_error::RollbackError;
pub use storage_error::StorageError;
pub use vault_error::VaultError;
