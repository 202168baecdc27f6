//! Sqlite persistence for the compliance pipeline: append-only interaction
//! log, per-day metric rollups, and compliance alerts.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
