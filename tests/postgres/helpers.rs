//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use gtd_core::workflow::adapters::postgres::{PostgresGtdStore, apply_schema};
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;

pub use super::cluster::BoxError;
use super::cluster::shared_cluster;

/// Environment variable naming an external server for these tests.
///
/// When unset, the shared embedded cluster is used instead.
pub const TEST_DATABASE_URL_VAR: &str = "GTD_TEST_DATABASE_URL";

/// Pins every pooled connection to one schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, r2d2::Error> for SearchPath {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(r2d2::Error::QueryError)
    }
}

/// Store bound to a throwaway schema that is dropped with this value.
pub struct TestDatabase {
    pub store: Arc<PostgresGtdStore>,
    url: String,
    schema: String,
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if let Ok(mut conn) = PgConnection::establish(&self.url) {
            let cleanup = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
            if let Err(err) = conn.batch_execute(&cleanup) {
                tracing::warn!(schema = %self.schema, error = %err, "schema cleanup failed");
            }
        }
    }
}

/// Creates a schema, applies the workflow tables and builds a store on it.
///
/// # Errors
///
/// Returns an error if the server is unreachable or the DDL fails.
pub fn provision(url: &str) -> Result<TestDatabase, BoxError> {
    let schema = format!("gtd_test_{}", Uuid::new_v4().simple());
    let mut admin = PgConnection::establish(url)?;
    admin.batch_execute(&format!("CREATE SCHEMA {schema}"))?;

    let pool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(schema.clone())))
        .build(ConnectionManager::<PgConnection>::new(url))?;
    let mut conn = pool.get()?;
    apply_schema(&mut conn)?;
    drop(conn);

    Ok(TestDatabase {
        store: Arc::new(PostgresGtdStore::new(pool)),
        url: url.to_owned(),
        schema,
    })
}

/// Resolves the server URL: the configured external server, else the
/// embedded cluster.
#[must_use]
pub fn server_url() -> String {
    std::env::var(TEST_DATABASE_URL_VAR).unwrap_or_else(|_| shared_cluster().admin_url())
}

/// Provides a store on a freshly provisioned schema.
#[fixture]
pub fn database() -> TestDatabase {
    provision(&server_url()).expect("test schema provisioning")
}

/// Provides a runtime for driving the async store from a synchronous test.
#[fixture]
pub fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}
