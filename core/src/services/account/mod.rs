//! Account lifecycle module
//!
//! Signup, email verification, the forgot/reset password flow and profile
//! reads/updates.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccountService, SignupRequest, VerificationOutcome};
