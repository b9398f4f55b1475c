//! sea-orm entities for the identity service.

pub mod accounts;
pub mod counters;
