//! Step definitions for tag ownership scenarios.

pub mod given;
pub mod then;
pub mod when;
