//! Adapters between files on disk and the domain types.

pub mod csv;
pub mod json;
