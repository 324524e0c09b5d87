//! # Komik Shared
//!
//! Shared configuration and validation helpers used by the core,
//! infrastructure and API crates.

pub mod config;
pub mod utils;
