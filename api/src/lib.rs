//! HTTP layer for the Komik authentication service.
//!
//! Thin adapters over `komik_core`: DTO validation, error-to-status
//! mapping, CORS and the route table. All business rules live in the core
//! services.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
