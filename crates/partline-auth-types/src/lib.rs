//! Session-token types for the Partline identity service.
//!
//! Provides JWT claims/validation and the `BearerToken` extractor.

pub mod bearer;
pub mod token;
