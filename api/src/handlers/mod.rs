//! Error mapping between domain errors and HTTP responses.

pub mod error;

pub use error::{
    domain_error_response, reset_error_response, reset_validation_failure, validation_failure,
};
