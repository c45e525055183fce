//! Command handlers.

pub mod mirror;
