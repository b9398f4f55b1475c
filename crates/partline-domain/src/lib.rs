//! Domain types shared across the Partline identity service.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod phone;
pub mod profile;
pub mod referral;
pub mod role;
