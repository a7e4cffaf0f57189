//! Step definitions for project completion scenarios.

pub mod then;
pub mod world;
