//! Profile route handlers

pub mod profile;
