//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! One cluster is shared per test binary. A template database carrying the
//! schema from `backend/migrations` is built once, keyed by a hash of that
//! directory, and every test gets a throwaway clone of it.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel_async::{AsyncConnection, AsyncPgConnection, SimpleAsyncConnection};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use study_tracker::outbound::persistence::{DbPool, PoolConfig};
use tokio::runtime::Runtime;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "study_template";
const CLUSTER_RETRIES: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated, per-test database with a runtime and a pool pointing at it.
pub struct PreparedDatabase {
    /// Runtime every repository call in the test is driven on.
    pub runtime: Runtime,
    /// Small pool over the temporary database.
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{CLUSTER_RETRIES} failed: {error:?}");
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("start embedded cluster: {error:?}")),
        }
    }
}

/// Every `up.sql` under `backend/migrations`, in directory-name order.
fn migration_scripts() -> Result<Vec<String>, String> {
    let mut dirs = std::fs::read_dir(migrations_dir())
        .map_err(|err| format!("read migrations: {err}"))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect::<Vec<_>>();
    dirs.sort();
    dirs.into_iter()
        .map(|dir| {
            std::fs::read_to_string(dir.join("up.sql"))
                .map_err(|err| format!("read {}: {err}", dir.display()))
        })
        .collect()
}

async fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = AsyncPgConnection::establish(url)
        .await
        .map_err(|err| format!("connect for migration: {err}"))?;
    for script in migration_scripts()? {
        conn.batch_execute(&script)
            .await
            .map_err(|err| format!("migration: {err}"))?;
    }
    Ok(())
}

fn ensure_template(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let template = format!("{TEMPLATE_NAME_PREFIX}_{}", hash.get(..8).unwrap_or(&hash));

    let _guard = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    let exists = cluster
        .database_exists(template.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template);
        runtime.block_on(migrate_schema(&url))?;
    }
    Ok(template)
}

/// Clone the migrated template into a fresh database and pool it.
pub fn prepare_database() -> Result<PreparedDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = cluster()?;
    let template = ensure_template(cluster, &runtime)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database_from_template(name.as_str(), template.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))?;

    let config = PoolConfig::new(database.url()).with_max_size(2);
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(PreparedDatabase {
        runtime,
        pool,
        _database: database,
    })
}
