//! Tests for the token service

mod reset_tests;
mod service_tests;
