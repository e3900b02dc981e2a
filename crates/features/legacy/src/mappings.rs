//! Mapping rows linking legacy articles to content items, plus their
//! per-field overrides.

use crate::error::LegacyError;
use crate::overrides::{FieldOverride, OverrideValue};
use surrealdb_types::SurrealValue;
use tessera_database::Database;
use tessera_domain::legacy::{LegacyMapping, MappingType, SyncDirection};
use tessera_kernel::safe_nanoid;
use tracing::debug;

#[derive(Debug, Clone, SurrealValue)]
struct MappingRecord {
    id: String,
    legacy_article_id: i64,
    content_id: String,
    mapping_type: String,
    is_active: bool,
    sync_direction: String,
}

impl MappingRecord {
    fn from_mapping(mapping: &LegacyMapping) -> Self {
        Self {
            id: mapping.id.clone(),
            legacy_article_id: mapping.legacy_article_id,
            content_id: mapping.content_id.clone(),
            mapping_type: mapping.mapping_type.as_str().to_owned(),
            is_active: mapping.is_active,
            sync_direction: mapping.sync_direction.as_str().to_owned(),
        }
    }

    fn into_mapping(self) -> Result<LegacyMapping, LegacyError> {
        let mapping_type =
            MappingType::parse(&self.mapping_type).ok_or_else(|| LegacyError::Corrupt {
                message: format!("unknown mapping type '{}' on {}", self.mapping_type, self.id)
                    .into(),
            })?;
        let sync_direction =
            SyncDirection::parse(&self.sync_direction).ok_or_else(|| LegacyError::Corrupt {
                message: format!("unknown sync direction '{}' on {}", self.sync_direction, self.id)
                    .into(),
            })?;
        Ok(LegacyMapping {
            id: self.id,
            legacy_article_id: self.legacy_article_id,
            content_id: self.content_id,
            mapping_type,
            is_active: self.is_active,
            sync_direction,
        })
    }
}

#[derive(Debug, Clone, SurrealValue)]
struct OverrideRecord {
    id: String,
    mapping_id: String,
    field_name: String,
    data_type: String,
    raw_value: String,
    is_active: bool,
}

impl OverrideRecord {
    fn into_override(self) -> Result<FieldOverride, LegacyError> {
        let value = OverrideValue::parse(&self.data_type, &self.raw_value)?;
        Ok(FieldOverride {
            id: self.id,
            mapping_id: self.mapping_id,
            field_name: self.field_name,
            value,
            is_active: self.is_active,
        })
    }
}

/// CRUD over legacy article mappings and their field overrides.
#[derive(Debug, Clone)]
pub struct MappingStore {
    db: Database,
}

impl MappingStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates an active mapping for a (legacy article, content item) pair.
    ///
    /// # Errors
    /// Returns [`LegacyError::DuplicateMapping`] if the pair already exists.
    pub async fn create(
        &self,
        legacy_article_id: i64,
        content_id: &str,
        mapping_type: MappingType,
        sync_direction: SyncDirection,
    ) -> Result<LegacyMapping, LegacyError> {
        let existing = self
            .db
            .query(
                "SELECT *, record::id(id) AS id FROM ONLY legacy_mapping \
                 WHERE legacy_article_id = $legacy_article_id AND content_id = $content_id \
                 LIMIT 1",
            )
            .bind(("legacy_article_id", legacy_article_id))
            .bind(("content_id", content_id.to_owned()))
            .await?
            .take::<Option<MappingRecord>>(0)?;
        if existing.is_some() {
            return Err(LegacyError::DuplicateMapping {
                legacy_article_id,
                content_id: content_id.to_owned(),
            });
        }

        let mapping = LegacyMapping {
            id: safe_nanoid!(),
            legacy_article_id,
            content_id: content_id.to_owned(),
            mapping_type,
            is_active: true,
            sync_direction,
        };

        self.db
            .query("CREATE type::record('legacy_mapping', $id) CONTENT $record")
            .bind(("id", mapping.id.clone()))
            .bind(("record", MappingRecord::from_mapping(&mapping)))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        debug!(id = %mapping.id, legacy_article_id, "Legacy mapping created");
        Ok(mapping)
    }

    /// Fetches a mapping by id.
    ///
    /// # Errors
    /// Returns [`LegacyError::NotFound`] for unknown ids.
    pub async fn get(&self, id: &str) -> Result<LegacyMapping, LegacyError> {
        self.db
            .query("SELECT *, record::id(id) AS id FROM ONLY type::record('legacy_mapping', $id)")
            .bind(("id", id.to_owned()))
            .await?
            .take::<Option<MappingRecord>>(0)?
            .ok_or_else(|| LegacyError::NotFound { key: id.to_owned().into() })?
            .into_mapping()
    }

    /// Lists every mapping pointing at a content item.
    ///
    /// # Errors
    /// Returns [`LegacyError::Database`] on store failures.
    pub async fn list_for_content(
        &self,
        content_id: &str,
    ) -> Result<Vec<LegacyMapping>, LegacyError> {
        let records = self
            .db
            .query(
                "SELECT *, record::id(id) AS id FROM legacy_mapping WHERE content_id = $content_id \
                 ORDER BY legacy_article_id",
            )
            .bind(("content_id", content_id.to_owned()))
            .await?
            .take::<Vec<MappingRecord>>(0)?;

        records.into_iter().map(MappingRecord::into_mapping).collect()
    }

    /// Activates or deactivates a mapping.
    ///
    /// # Errors
    /// Returns [`LegacyError::NotFound`] for unknown ids.
    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<(), LegacyError> {
        self.get(id).await?;

        self.db
            .query("UPDATE type::record('legacy_mapping', $id) SET is_active = $is_active")
            .bind(("id", id.to_owned()))
            .bind(("is_active", is_active))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        Ok(())
    }

    /// Stores a field override, deactivating any previously active override
    /// for the same field on the same mapping.
    ///
    /// # Errors
    /// Returns [`LegacyError::NotFound`] if the mapping does not exist.
    pub async fn set_override(
        &self,
        mapping_id: &str,
        field_name: &str,
        value: OverrideValue,
    ) -> Result<FieldOverride, LegacyError> {
        self.get(mapping_id).await?;

        let record = OverrideRecord {
            id: safe_nanoid!(),
            mapping_id: mapping_id.to_owned(),
            field_name: field_name.to_owned(),
            data_type: value.kind().to_owned(),
            raw_value: value.format(),
            is_active: true,
        };

        self.db
            .query(
                "BEGIN TRANSACTION;
                UPDATE field_override SET is_active = false \
                    WHERE mapping_id = $mapping_id AND field_name = $field_name;
                CREATE type::record('field_override', $id) CONTENT $record;
                COMMIT TRANSACTION;",
            )
            .bind(("mapping_id", mapping_id.to_owned()))
            .bind(("field_name", field_name.to_owned()))
            .bind(("id", record.id.clone()))
            .bind(("record", record.clone()))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        debug!(mapping_id, field_name, "Field override stored");
        record.into_override()
    }

    /// Returns the active overrides of a mapping, keyed by field name in
    /// the result order.
    ///
    /// # Errors
    /// Returns [`LegacyError::Database`] on store failures.
    pub async fn active_overrides(
        &self,
        mapping_id: &str,
    ) -> Result<Vec<FieldOverride>, LegacyError> {
        let records = self
            .db
            .query(
                "SELECT *, record::id(id) AS id FROM field_override \
                 WHERE mapping_id = $mapping_id AND is_active = true \
                 ORDER BY field_name",
            )
            .bind(("mapping_id", mapping_id.to_owned()))
            .await?
            .take::<Vec<OverrideRecord>>(0)?;

        records.into_iter().map(OverrideRecord::into_override).collect()
    }
}
