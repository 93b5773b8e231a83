//! Process-wide SurrealDB handle for the queue admin store.

use std::sync::LazyLock;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use thiserror::Error;
use tokio::sync::OnceCell;

static DB: LazyLock<OnceCell<Surreal<Any>>> = LazyLock::new(OnceCell::new);

/// Database connection wrapper.
pub type Database = Surreal<Any>;

/// Where the admin store lives and how to sign in to it.
#[derive(Clone)]
pub struct DbConfig {
    /// `mem://`, `file://path` or `rocksdb://path`.
    pub endpoint: String,
    pub namespace: String,
    pub database: String,
    /// Root username and password.
    pub credentials: Option<(String, String)>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            endpoint: "mem://".to_string(),
            namespace: "engage".to_string(),
            database: "main".to_string(),
            credentials: None,
        }
    }
}

impl DbConfig {
    /// Throwaway in-memory store, used by tests and the demo server.
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            endpoint: format!("file://{}", path.into()),
            ..Default::default()
        }
    }

    /// Requires the `rocksdb` feature.
    pub fn rocksdb(path: impl Into<String>) -> Self {
        Self {
            endpoint: format!("rocksdb://{}", path.into()),
            ..Default::default()
        }
    }

    /// Build a config from `ENGAGE_DB_*` environment variables.
    ///
    /// Unset variables fall back to the in-memory defaults. Credentials are
    /// only used when both `ENGAGE_DB_USER` and `ENGAGE_DB_PASSWORD` are set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut config = Self {
            endpoint: var("ENGAGE_DB_ENDPOINT").unwrap_or(defaults.endpoint),
            namespace: var("ENGAGE_DB_NAMESPACE").unwrap_or(defaults.namespace),
            database: var("ENGAGE_DB_DATABASE").unwrap_or(defaults.database),
            credentials: None,
        };
        if let (Some(user), Some(password)) = (var("ENGAGE_DB_USER"), var("ENGAGE_DB_PASSWORD")) {
            config = config.with_credentials(user, password);
        }
        config
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }
}

impl std::fmt::Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ns={} db={}", self.endpoint, self.namespace, self.database)?;
        if let Some((user, _)) = &self.credentials {
            write!(f, " user={}", user)?;
        }
        Ok(())
    }
}

// Keeps the password out of `{:?}` in logs and panics.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("endpoint", &self.endpoint)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("user", &self.credentials.as_ref().map(|(user, _)| user))
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database not initialized - call init_db first")]
    NotInitialized,
    #[error("Connection error: {0}")]
    Connection(#[from] surrealdb::Error),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Connect once for the whole process.
///
/// Later calls return the existing connection and ignore `config`, so
/// tests sharing a process share one in-memory store.
pub async fn init_db(config: DbConfig) -> Result<&'static Database, DbError> {
    DB.get_or_try_init(|| async {
        tracing::info!("Connecting to queue store: {}", config);

        let db = connect(&config.endpoint).await?;

        if let Some((username, password)) = &config.credentials {
            db.signin(Root { username, password }).await?;
        }

        db.use_ns(&config.namespace).use_db(&config.database).await?;

        tracing::info!("Queue store ready: {}/{}", config.namespace, config.database);

        Ok(db)
    })
    .await
}

/// The connection made by [`init_db`].
pub fn get_db() -> Result<&'static Database, DbError> {
    DB.get().ok_or(DbError::NotInitialized)
}
