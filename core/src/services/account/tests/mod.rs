//! Tests for the account lifecycle service

mod profile_tests;
mod reset_tests;
mod signup_tests;
