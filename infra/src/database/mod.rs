//! Database module - MySQL implementations using SQLx
//!
//! Provides the connection pool and the account repository backing
//! `komik_core::repositories::AccountRepository`.

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlAccountRepository;
