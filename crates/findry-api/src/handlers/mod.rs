//! HTTP handler modules for findry-api.

pub mod datasets;
pub mod search;
pub mod system;
