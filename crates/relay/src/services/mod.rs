//! Business logic services.

pub mod email;
