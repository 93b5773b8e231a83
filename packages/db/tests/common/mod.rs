use std::sync::LazyLock;

use tokio::sync::{Mutex, MutexGuard};

use db::{DbConfig, DbError};

static TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

const CLEAR_TABLES: &str = "DELETE queue_assignment; DELETE queue; DELETE submission; \
     DELETE member; DELETE subgenre; DELETE genre_family; DELETE setting;";

pub async fn setup_db() -> Result<MutexGuard<'static, ()>, DbError> {
    let guard = TEST_LOCK.lock().await;
    db::init(DbConfig::memory()).await?;
    reset_db().await?;
    Ok(guard)
}

pub async fn reset_db() -> Result<(), DbError> {
    db::get_db()?.query(CLEAR_TABLES).await?.check()?;
    Ok(())
}
