//! HTTP middleware and request guards.

pub mod auth;
pub mod cors;
