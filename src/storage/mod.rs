//! SQLite storage layer

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::Storage;
pub use migrations::run_migrations;
