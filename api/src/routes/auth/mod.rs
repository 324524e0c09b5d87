//! Authentication route handlers
//!
//! Login (both legs), signup, email verification and the forgot/reset
//! password pair.

pub mod forgot_password;
pub mod login;
pub mod reset_password;
pub mod signup;
pub mod verify_email;
