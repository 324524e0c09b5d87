//! Domain entities.

pub mod account;

pub use account::{Account, Role, PASSWORD_HISTORY_CAPACITY};
