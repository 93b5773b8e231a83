//! Genre taxonomy repository.

use queue_core::{GenreFamily, GenreId, Subgenre};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::parse_record_id;
use crate::{DbError, get_db};

pub struct GenreRepository;

#[derive(Debug, Deserialize)]
struct FamilyRecord {
    #[serde(default)]
    id: Option<Thing>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SubgenreRecord {
    #[serde(default)]
    id: Option<Thing>,
    family_id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct FamilyCreate {
    name: String,
}

#[derive(Debug, Serialize)]
struct SubgenreCreate {
    family_id: String,
    name: String,
}

impl SubgenreRecord {
    fn into_subgenre(self) -> Result<Subgenre, DbError> {
        let id = parse_record_id(&self.id, GenreId::parse)?;
        let family_id = GenreId::parse(&self.family_id).map_err(|e| {
            DbError::Serialization(format!("bad family id '{}': {}", self.family_id, e))
        })?;
        Ok(Subgenre {
            id,
            family_id,
            name: self.name,
        })
    }
}

impl GenreRepository {
    pub async fn create_family(family: &GenreFamily) -> Result<GenreFamily, DbError> {
        let db = get_db()?;

        let record: Option<FamilyRecord> = db
            .create(("genre_family", family.id.to_string()))
            .content(FamilyCreate {
                name: family.name.clone(),
            })
            .await?;

        record
            .map(|r| GenreFamily {
                id: family.id,
                name: r.name,
            })
            .ok_or_else(|| DbError::Query("Failed to create genre family".into()))
    }

    /// All genre families, alphabetical.
    pub async fn list_families() -> Result<Vec<GenreFamily>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM genre_family ORDER BY name ASC")
            .await?;
        let records: Vec<FamilyRecord> = result.take(0)?;

        records
            .into_iter()
            .map(|r| {
                Ok(GenreFamily {
                    id: parse_record_id(&r.id, GenreId::parse)?,
                    name: r.name,
                })
            })
            .collect()
    }

    pub async fn create_subgenre(subgenre: &Subgenre) -> Result<Subgenre, DbError> {
        let db = get_db()?;

        let record: Option<SubgenreRecord> = db
            .create(("subgenre", subgenre.id.to_string()))
            .content(SubgenreCreate {
                family_id: subgenre.family_id.to_string(),
                name: subgenre.name.clone(),
            })
            .await?;

        record
            .map(|r| Subgenre {
                id: subgenre.id,
                family_id: subgenre.family_id,
                name: r.name,
            })
            .ok_or_else(|| DbError::Query("Failed to create subgenre".into()))
    }

    /// Subgenres of one family, alphabetical.
    pub async fn list_subgenres(family_id: GenreId) -> Result<Vec<Subgenre>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM subgenre WHERE family_id = $family_id ORDER BY name ASC")
            .bind(("family_id", family_id.to_string()))
            .await?;
        let records: Vec<SubgenreRecord> = result.take(0)?;

        records.into_iter().map(SubgenreRecord::into_subgenre).collect()
    }
}
