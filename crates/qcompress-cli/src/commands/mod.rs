//! CLI command implementations.

pub mod build;
pub mod common;
pub mod inspect;
pub mod overlap;
pub mod version;
