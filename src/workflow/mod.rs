//! GTD workflow bounded context.
//!
//! Users organise tasks under projects and areas, file them by context, tag
//! them and record dependencies between them. The context follows the
//! hexagonal layout used throughout the crate:
//!
//! - [`domain`]: entities, status state machines and validation rules
//! - [`ports`]: repository traits describing the entity store
//! - [`adapters`]: in-memory and `PostgreSQL` stores
//! - [`services`]: the lifecycle, dependency-graph and tagging managers

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
