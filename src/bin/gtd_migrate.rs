//! Creates the GTD workflow schema in the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! GTD_DATABASE_URL=postgres://localhost/gtd gtd-migrate
//! ```
//!
//! Running it against an already migrated database is a no-op.

use std::process::ExitCode;

use gtd_core::{
    config::{ConfigError, StoreConfig},
    telemetry,
    workflow::{adapters::postgres::apply_schema, ports::RepositoryError},
};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
enum MigrateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to check out a connection: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    #[error(transparent)]
    Schema(#[from] RepositoryError),
}

fn run() -> Result<(), MigrateError> {
    let config = StoreConfig::from_env()?;
    info!(pool_max_size = config.pool_max_size, "connecting to database");
    let pool = config.build_pool()?;
    let mut connection = pool.get()?;
    if apply_schema(&mut connection)? {
        info!("workflow schema created");
    } else {
        info!("workflow schema already present");
    }
    Ok(())
}

fn main() -> ExitCode {
    telemetry::init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "migration failed");
            ExitCode::FAILURE
        }
    }
}
