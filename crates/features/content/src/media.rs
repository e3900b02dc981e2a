//! Media library records. Only URLs and metadata live here; binary content
//! is owned by the external file storage collaborator.

use crate::error::ContentError;
use surrealdb_types::SurrealValue;
use tessera_database::Database;
use tessera_domain::constants::DEFAULT_LIST_LIMIT;
use tessera_domain::content::MediaItem;
use tessera_kernel::safe_nanoid;
use tracing::debug;

/// Fields supplied when registering an uploaded asset.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub url: String,
    pub name: String,
    pub mime: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, SurrealValue)]
struct MediaRecord {
    id: String,
    url: String,
    name: String,
    mime: String,
    alt: Option<String>,
    created_at: i64,
}

impl MediaRecord {
    fn into_item(self) -> MediaItem {
        MediaItem {
            id: self.id,
            url: self.url,
            name: self.name,
            mime: self.mime,
            alt: self.alt,
            created_at: self.created_at,
        }
    }
}

/// CRUD over uploaded asset references.
#[derive(Debug, Clone)]
pub struct MediaStore {
    db: Database,
}

impl MediaStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Registers an uploaded asset.
    ///
    /// # Errors
    /// Returns [`ContentError::Database`] on store failures.
    pub async fn create(&self, new: NewMedia) -> Result<MediaItem, ContentError> {
        let record = MediaRecord {
            id: safe_nanoid!(),
            url: new.url,
            name: new.name,
            mime: new.mime,
            alt: new.alt,
            created_at: chrono::Utc::now().timestamp(),
        };

        self.db
            .query("CREATE type::record('media_item', $id) CONTENT $record")
            .bind(("id", record.id.clone()))
            .bind(("record", record.clone()))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        debug!(id = %record.id, name = %record.name, "Media item registered");
        Ok(record.into_item())
    }

    /// Fetches an asset by id.
    ///
    /// # Errors
    /// Returns [`ContentError::NotFound`] for unknown ids.
    pub async fn get(&self, id: &str) -> Result<MediaItem, ContentError> {
        self.db
            .query("SELECT *, record::id(id) AS id FROM ONLY type::record('media_item', $id)")
            .bind(("id", id.to_owned()))
            .await?
            .take::<Option<MediaRecord>>(0)?
            .map(MediaRecord::into_item)
            .ok_or_else(|| ContentError::NotFound { key: id.to_owned().into() })
    }

    /// Lists assets newest first, optionally narrowed by a MIME prefix
    /// such as `image/`.
    ///
    /// # Errors
    /// Returns [`ContentError::Database`] on store failures.
    pub async fn list(&self, mime_prefix: Option<&str>) -> Result<Vec<MediaItem>, ContentError> {
        let limit = i64::try_from(DEFAULT_LIST_LIMIT).unwrap_or(i64::MAX);

        let records = if let Some(prefix) = mime_prefix {
            self.db
                .query(
                    "SELECT *, record::id(id) AS id FROM media_item \
                     WHERE string::starts_with(mime, $prefix) \
                     ORDER BY created_at DESC LIMIT $limit",
                )
                .bind(("prefix", prefix.to_owned()))
                .bind(("limit", limit))
                .await?
                .take::<Vec<MediaRecord>>(0)?
        } else {
            self.db
                .query(
                    "SELECT *, record::id(id) AS id FROM media_item \
                     ORDER BY created_at DESC LIMIT $limit",
                )
                .bind(("limit", limit))
                .await?
                .take::<Vec<MediaRecord>>(0)?
        };

        Ok(records.into_iter().map(MediaRecord::into_item).collect())
    }

    /// Removes an asset reference.
    ///
    /// # Errors
    /// Returns [`ContentError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        self.get(id).await?;

        self.db
            .query("DELETE type::record('media_item', $id)")
            .bind(("id", id.to_owned()))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        Ok(())
    }
}
