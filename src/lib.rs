//! GTD core: the lifecycle and referential-integrity logic behind a "Getting
//! Things Done" productivity backend.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the entity store
//! - **Adapters**: Concrete store implementations (in-memory, `PostgreSQL`)
//! - **Services**: Managers orchestrating one business operation per call
//!
//! # Modules
//!
//! - [`workflow`]: Projects, tasks, the dependency graph and tagging
//! - [`config`]: Store configuration read from the environment
//! - [`telemetry`]: Tracing subscriber set-up

pub mod config;
pub mod telemetry;
pub mod workflow;
