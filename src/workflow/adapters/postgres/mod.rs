//! `PostgreSQL` adapter for workflow persistence.
//!
//! Every repository call checks a connection out of an r2d2 pool and runs on
//! the blocking thread pool. Referential clean-up on delete is delegated to
//! foreign keys declared by the schema migration; dependency edges carry no
//! foreign keys and are only removed by explicit edge deletes or
//! [`TaskRepository::delete_task_cascading`](crate::workflow::ports::TaskRepository::delete_task_cascading).

mod catalog;
mod graph;
mod models;
mod planning;
mod schema;

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Bool;

use crate::workflow::ports::{RepositoryError, RepositoryResult};

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type GtdPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed implementation of every workflow repository.
#[derive(Debug, Clone)]
pub struct PostgresGtdStore {
    pool: GtdPgPool,
}

impl PostgresGtdStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: GtdPgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &GtdPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RepositoryError::persistence)?
    }
}

/// SQL creating the workflow tables, shared with the migration directory.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_gtd_schema/up.sql");

/// Creates the workflow tables unless they already exist in the connection's
/// search path. Returns `true` when the schema was created.
///
/// # Errors
///
/// Returns [`RepositoryError`] when the existence check or the DDL fails.
pub fn apply_schema(connection: &mut PgConnection) -> RepositoryResult<bool> {
    connection.transaction::<_, RepositoryError, _>(|tx_conn| {
        let exists = diesel::select(diesel::dsl::sql::<Bool>(
            "to_regclass('users') IS NOT NULL",
        ))
        .get_result::<bool>(tx_conn)?;
        if exists {
            return Ok(false);
        }
        tx_conn.batch_execute(SCHEMA_SQL)?;
        Ok(true)
    })
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
                Self::Duplicate(describe_constraint(info.constraint_name(), info.message()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info) => {
                Self::ConstraintViolation(describe_constraint(
                    info.constraint_name(),
                    info.message(),
                ))
            }
            other => Self::persistence(other),
        }
    }
}

fn describe_constraint(constraint: Option<&str>, message: &str) -> String {
    constraint.map_or_else(|| message.to_owned(), str::to_owned)
}
