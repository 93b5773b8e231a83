//! Key/value application settings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{DbError, get_db};

pub struct SettingsRepository;

#[derive(Debug, Serialize, Deserialize)]
struct SettingRecord {
    value: serde_json::Value,
}

impl SettingsRepository {
    /// Read a setting, `None` if it was never written.
    pub async fn get<T: DeserializeOwned>(key: &str) -> Result<Option<T>, DbError> {
        let db = get_db()?;

        let record: Option<SettingRecord> = db.select(("setting", key.to_string())).await?;

        record
            .map(|r| {
                serde_json::from_value(r.value)
                    .map_err(|e| DbError::Serialization(format!("setting '{}': {}", key, e)))
            })
            .transpose()
    }

    /// Write a setting, replacing any previous value.
    pub async fn set<T: Serialize>(key: &str, value: &T) -> Result<(), DbError> {
        let db = get_db()?;

        let value = serde_json::to_value(value)
            .map_err(|e| DbError::Serialization(format!("setting '{}': {}", key, e)))?;

        let _: Option<SettingRecord> = db
            .upsert(("setting", key.to_string()))
            .content(SettingRecord { value })
            .await?;

        Ok(())
    }
}
