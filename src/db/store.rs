use crate::config::{Backend, DatabaseConfig, redacted};
use crate::db::models::{Student, StudentId};
use crate::db::schema::init_statement;
use crate::error::RosterError;
use crate::types::StudentFields;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions, AnyRow, install_default_drivers};
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyConnection, AnyPool, ConnectOptions, Connection, Row};
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tracing::{debug, info, warn};

const SELECT_ALL: &str = "SELECT * FROM students";
const INSERT: &str = "INSERT INTO students (name, course, mobile) VALUES (?, ?, ?)";
const UPDATE: &str = "UPDATE students SET name = ?, course = ?, mobile = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM students WHERE id = ?";
const SELECT_BY_NAME: &str = "SELECT * FROM students WHERE name = ?";

#[derive(Clone, Debug)]
enum Connector {
    /// Open a fresh connection for every statement and close it afterwards.
    PerCall(AnyConnectOptions),
    Pooled(AnyPool),
}

/// A connection scoped to a single statement.
enum StoreConnection {
    Direct(AnyConnection),
    Pooled(PoolConnection<Any>),
}

impl Deref for StoreConnection {
    type Target = AnyConnection;

    fn deref(&self) -> &Self::Target {
        match self {
            StoreConnection::Direct(conn) => conn,
            StoreConnection::Pooled(conn) => &**conn,
        }
    }
}

impl DerefMut for StoreConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            StoreConnection::Direct(conn) => conn,
            StoreConnection::Pooled(conn) => &mut **conn,
        }
    }
}

impl StoreConnection {
    async fn release(self) {
        match self {
            StoreConnection::Direct(conn) => {
                if let Err(e) = conn.close().await {
                    warn!(error = %e, "failed to close database connection");
                }
            }
            // Dropping returns it to the pool.
            StoreConnection::Pooled(conn) => drop(conn),
        }
    }
}

/// Data-access layer over the `students` table.
///
/// Each method runs exactly one statement on a connection acquired for that
/// call alone. Nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct StudentStore {
    connector: Connector,
    backend: Backend,
    connect_timeout: Duration,
}

/// Connect to the configured database and create the table if asked to.
pub async fn connect_store(cfg: &DatabaseConfig) -> Result<StudentStore, RosterError> {
    let store = StudentStore::connect(cfg).await?;
    if cfg.init_schema {
        store.init_schema().await?;
    }
    Ok(store)
}

impl StudentStore {
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, RosterError> {
        install_default_drivers();

        let url = cfg.connect_url()?;
        let backend = Backend::from_url(&url)?;
        let options = AnyConnectOptions::from_url(&url)?;
        let connect_timeout = cfg.connect_timeout();

        let connector = match cfg.pool_size {
            Some(size) => {
                let pool = AnyPoolOptions::new()
                    .max_connections(size.max(1))
                    .acquire_timeout(connect_timeout)
                    .connect_with(options)
                    .await
                    .map_err(|e| RosterError::pool_acquire(e, connect_timeout))?;
                Connector::Pooled(pool)
            }
            None => Connector::PerCall(options),
        };

        info!(
            database_url = %redacted(&url),
            pool_size = ?cfg.pool_size,
            "student store ready"
        );

        Ok(Self {
            connector,
            backend,
            connect_timeout,
        })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    async fn acquire(&self) -> Result<StoreConnection, RosterError> {
        match &self.connector {
            Connector::PerCall(options) => {
                let conn = tokio::time::timeout(
                    self.connect_timeout,
                    AnyConnection::connect_with(options),
                )
                .await
                .map_err(|_| RosterError::ConnectTimeout(self.connect_timeout))?
                .map_err(RosterError::Connection)?;
                Ok(StoreConnection::Direct(conn))
            }
            Connector::Pooled(pool) => {
                let conn = pool
                    .acquire()
                    .await
                    .map_err(|e| RosterError::pool_acquire(e, self.connect_timeout))?;
                Ok(StoreConnection::Pooled(conn))
            }
        }
    }

    /// Create the `students` table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), RosterError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(init_statement(self.backend))
            .execute(&mut *conn)
            .await;
        conn.release().await;
        result?;
        Ok(())
    }

    /// Every row, in whatever order the engine returns them.
    pub async fn list_all(&self) -> Result<Vec<Student>, RosterError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(SELECT_ALL).fetch_all(&mut *conn).await;
        conn.release().await;
        let rows = result?;
        debug!(count = rows.len(), "listed students");
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Append a row. Returns the generated id when the driver reports one.
    pub async fn insert(&self, fields: &StudentFields) -> Result<Option<StudentId>, RosterError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(INSERT)
            .bind(fields.name.as_str())
            .bind(fields.course.as_str())
            .bind(fields.mobile.as_str())
            .execute(&mut *conn)
            .await;
        conn.release().await;
        let id = result?.last_insert_id();
        debug!(id = ?id, "inserted student");
        Ok(id)
    }

    /// Overwrite name, course and mobile of row `id`. Returns the number of
    /// rows affected; a missing id yields 0, not an error.
    pub async fn update(&self, id: StudentId, fields: &StudentFields) -> Result<u64, RosterError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(UPDATE)
            .bind(fields.name.as_str())
            .bind(fields.course.as_str())
            .bind(fields.mobile.as_str())
            .bind(id)
            .execute(&mut *conn)
            .await;
        conn.release().await;
        let affected = result?.rows_affected();
        if affected == 0 {
            warn!(id, "update matched no student; treating as success");
        }
        Ok(affected)
    }

    /// Hard-delete row `id`. Same zero-rows rule as [`StudentStore::update`].
    pub async fn delete(&self, id: StudentId) -> Result<u64, RosterError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(DELETE).bind(id).execute(&mut *conn).await;
        conn.release().await;
        let affected = result?.rows_affected();
        if affected == 0 {
            warn!(id, "delete matched no student; treating as success");
        }
        Ok(affected)
    }

    /// Rows whose name equals `name` exactly, including case.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, RosterError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(SELECT_BY_NAME)
            .bind(name)
            .fetch_all(&mut *conn)
            .await;
        conn.release().await;
        let rows = result?;

        // MySQL's default collations compare case-insensitively.
        let found: Vec<Student> = rows
            .into_iter()
            .map(Self::row_to_model)
            .filter(|r| r.as_ref().map_or(true, |s| s.name == name))
            .collect::<Result<_, _>>()?;
        debug!(name, count = found.len(), "searched students by name");
        Ok(found)
    }

    fn row_to_model(row: AnyRow) -> Result<Student, RosterError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let course: String = row.try_get("course")?;
        let mobile: String = row.try_get("mobile")?;

        Ok(Student {
            id,
            name,
            course,
            mobile,
        })
    }
}
