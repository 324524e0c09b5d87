//! Tests for the login orchestrator

mod harness;
mod lockout_tests;
