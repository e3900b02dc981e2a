//! Content item feature slice.
//!
//! Owns the page/post records, their attached zone values ("template
//! settings"), and the media library. Zone payloads are validated against
//! the item's template schema at save time; rendering stays fail-open.

mod error;
mod media;

pub use error::ContentError;
pub use media::{MediaStore, NewMedia};

use fxhash::FxHashMap;
use std::any::Any;
use surrealdb_types::SurrealValue;
use tessera_database::Database;
use tessera_domain::content::{ContentItem, ContentStatus, TemplateSettings};
use tessera_domain::constants::DEFAULT_LIST_LIMIT;
use tessera_domain::registry::{FeatureState, RegisteredFeature};
use tessera_kernel::safe_nanoid;
use tessera_templates::TemplateRegistry;
use tessera_zones::{ZoneValues, renderer, validator};
use tracing::{debug, info};

/// Fields an editor supplies when creating a content item.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub template: String,
    pub parent_id: Option<String>,
    pub sort_order: i64,
}

/// Storage form of a [`ContentItem`].
#[derive(Debug, SurrealValue)]
struct ContentRecord {
    id: String,
    title: String,
    slug: String,
    body: String,
    status: String,
    template: String,
    parent_id: Option<String>,
    sort_order: i64,
    published_at: Option<i64>,
}

impl ContentRecord {
    fn from_item(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            slug: item.slug.clone(),
            body: item.body.clone(),
            status: item.status.as_str().to_owned(),
            template: item.template.clone(),
            parent_id: item.parent_id.clone(),
            sort_order: item.sort_order,
            published_at: item.published_at,
        }
    }

    fn into_item(self) -> Result<ContentItem, ContentError> {
        let status = ContentStatus::parse(&self.status).ok_or_else(|| ContentError::Corrupt {
            message: format!("unknown status '{}' on content {}", self.status, self.id).into(),
        })?;
        Ok(ContentItem {
            id: self.id,
            title: self.title,
            slug: self.slug,
            body: self.body,
            status,
            template: self.template,
            parent_id: self.parent_id,
            sort_order: self.sort_order,
            published_at: self.published_at,
        })
    }
}

/// Zone values attached 1:1 to a content item, stored as JSON text.
#[derive(Debug, SurrealValue)]
struct SettingsRecord {
    content_id: String,
    values: String,
}

/// CRUD over content items plus validated zone value storage and rendering.
#[derive(Debug, Clone)]
pub struct ContentStore {
    db: Database,
    templates: TemplateRegistry,
}

impl ContentStore {
    #[must_use]
    pub const fn new(db: Database, templates: TemplateRegistry) -> Self {
        Self { db, templates }
    }

    /// Creates a draft content item.
    ///
    /// # Errors
    /// * [`ContentError::Template`] if the template identifier is unknown.
    /// * [`ContentError::DuplicateSlug`] if the slug is taken.
    pub async fn create(&self, new: NewContent) -> Result<ContentItem, ContentError> {
        // The template reference must resolve before anything is stored.
        self.templates.get(&new.template).await?;

        if self.find_by_slug(&new.slug).await?.is_some() {
            return Err(ContentError::DuplicateSlug { slug: new.slug });
        }

        let item = ContentItem {
            id: safe_nanoid!(),
            title: new.title,
            slug: new.slug,
            body: new.body,
            status: ContentStatus::Draft,
            template: new.template,
            parent_id: new.parent_id,
            sort_order: new.sort_order,
            published_at: None,
        };

        self.db
            .query("CREATE type::record('content_item', $id) CONTENT $record")
            .bind(("id", item.id.clone()))
            .bind(("record", ContentRecord::from_item(&item)))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        debug!(id = %item.id, slug = %item.slug, "Content item created");
        Ok(item)
    }

    /// Fetches an item by id.
    ///
    /// # Errors
    /// Returns [`ContentError::NotFound`] for unknown ids.
    pub async fn get(&self, id: &str) -> Result<ContentItem, ContentError> {
        self.db
            .query("SELECT *, record::id(id) AS id FROM ONLY type::record('content_item', $id)")
            .bind(("id", id.to_owned()))
            .await?
            .take::<Option<ContentRecord>>(0)?
            .ok_or_else(|| ContentError::NotFound { key: id.to_owned().into() })?
            .into_item()
    }

    /// Fetches an item by slug.
    ///
    /// # Errors
    /// Returns [`ContentError::NotFound`] for unknown slugs.
    pub async fn get_by_slug(&self, slug: &str) -> Result<ContentItem, ContentError> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| ContentError::NotFound { key: slug.to_owned().into() })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ContentItem>, ContentError> {
        self.db
            .query("SELECT *, record::id(id) AS id FROM ONLY content_item WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_owned()))
            .await?
            .take::<Option<ContentRecord>>(0)?
            .map(ContentRecord::into_item)
            .transpose()
    }

    /// Persists edits to an existing item. The id must already exist and
    /// the (possibly changed) template must resolve.
    ///
    /// # Errors
    /// * [`ContentError::NotFound`] if the item does not exist.
    /// * [`ContentError::Template`] if the template identifier is unknown.
    /// * [`ContentError::DuplicateSlug`] if the slug was changed to a taken one.
    pub async fn update(&self, item: &ContentItem) -> Result<(), ContentError> {
        let existing = self.get(&item.id).await?;
        self.templates.get(&item.template).await?;

        if item.slug != existing.slug && self.find_by_slug(&item.slug).await?.is_some() {
            return Err(ContentError::DuplicateSlug { slug: item.slug.clone() });
        }

        self.db
            .query("UPSERT type::record('content_item', $id) CONTENT $record")
            .bind(("id", item.id.clone()))
            .bind(("record", ContentRecord::from_item(item)))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        Ok(())
    }

    /// Marks an item published, stamping `published_at` on the first publish.
    ///
    /// # Errors
    /// Returns [`ContentError::NotFound`] for unknown ids.
    pub async fn publish(&self, id: &str) -> Result<ContentItem, ContentError> {
        let mut item = self.get(id).await?;
        item.status = ContentStatus::Published;
        if item.published_at.is_none() {
            item.published_at = Some(chrono::Utc::now().timestamp());
        }
        self.update(&item).await?;
        info!(id = %item.id, slug = %item.slug, "Content item published");
        Ok(item)
    }

    /// Deletes an item and its attached zone values (cascade).
    ///
    /// # Errors
    /// Returns [`ContentError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        // Surface NotFound before mutating anything.
        self.get(id).await?;

        self.db
            .query(
                "BEGIN TRANSACTION;
                DELETE type::record('content_item', $id);
                DELETE template_settings WHERE content_id = $id;
                COMMIT TRANSACTION;",
            )
            .bind(("id", id.to_owned()))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        debug!(id, "Content item deleted");
        Ok(())
    }

    /// Lists items ordered by `sort_order`, optionally filtered by status.
    ///
    /// # Errors
    /// Returns [`ContentError::Database`] on store failures.
    pub async fn list(
        &self,
        status: Option<ContentStatus>,
    ) -> Result<Vec<ContentItem>, ContentError> {
        let limit = i64::try_from(DEFAULT_LIST_LIMIT).unwrap_or(i64::MAX);
        let mut query = if let Some(status) = status {
            self.db
                .query(
                    "SELECT *, record::id(id) AS id FROM content_item WHERE status = $status \
                     ORDER BY sort_order LIMIT $limit",
                )
                .bind(("status", status.as_str().to_owned()))
        } else {
            self.db
                .query("SELECT *, record::id(id) AS id FROM content_item ORDER BY sort_order LIMIT $limit")
        };
        query = query.bind(("limit", limit));

        let records = query.await?.take::<Vec<ContentRecord>>(0)?;
        records.into_iter().map(ContentRecord::into_item).collect()
    }

    /// Saves the zone value payload for an item after validating it against
    /// the item's template schema. Required zones must be present and well
    /// shaped; optional zones are stored as-is.
    ///
    /// # Errors
    /// * [`ContentError::NotFound`] if the item does not exist.
    /// * [`ContentError::InvalidZones`] listing every failed required zone.
    pub async fn save_settings(
        &self,
        content_id: &str,
        values: ZoneValues,
    ) -> Result<(), ContentError> {
        let item = self.get(content_id).await?;
        let template = self.templates.get(&item.template).await?;

        let violations = validator::violations(&template.zones, &values);
        if !violations.is_empty() {
            return Err(ContentError::InvalidZones { violations });
        }

        let record = SettingsRecord {
            content_id: content_id.to_owned(),
            values: serde_json::to_string(&values)?,
        };

        self.db
            .query("UPSERT type::record('template_settings', $content_id) CONTENT $record")
            .bind(("content_id", content_id.to_owned()))
            .bind(("record", record))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        Ok(())
    }

    /// Loads the zone value payload for an item. Items that never saved any
    /// settings get an empty payload.
    ///
    /// # Errors
    /// Returns [`ContentError::Database`] on store failures.
    pub async fn load_settings(&self, content_id: &str) -> Result<TemplateSettings, ContentError> {
        let record = self
            .db
            .query("SELECT * FROM ONLY type::record('template_settings', $content_id)")
            .bind(("content_id", content_id.to_owned()))
            .await?
            .take::<Option<SettingsRecord>>(0)?;

        match record {
            Some(record) => Ok(TemplateSettings {
                content_id: record.content_id,
                values: serde_json::from_str(&record.values)?,
            }),
            None => {
                Ok(TemplateSettings { content_id: content_id.to_owned(), values: ZoneValues::new() })
            },
        }
    }

    /// Renders an item's zone values into per-zone HTML fragments, keyed by
    /// zone key. Every zone of the template appears in the result; missing
    /// or malformed values render as empty fragments.
    ///
    /// # Errors
    /// * [`ContentError::NotFound`] if the item does not exist.
    /// * [`ContentError::Template`] if its template was removed.
    pub async fn render(&self, content_id: &str) -> Result<FxHashMap<String, String>, ContentError> {
        let item = self.get(content_id).await?;
        let template = self.templates.get(&item.template).await?;
        let settings = self.load_settings(content_id).await?;

        Ok(renderer::render_all(&template.zones, &settings.values))
    }
}

/// Content feature state.
#[derive(Debug)]
pub struct Content {
    store: ContentStore,
    media: MediaStore,
}

impl Content {
    #[must_use]
    pub const fn store(&self) -> &ContentStore {
        &self.store
    }

    #[must_use]
    pub const fn media(&self) -> &MediaStore {
        &self.media
    }
}

impl FeatureState for Content {
    fn name(&self) -> &'static str {
        "content"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the content feature.
#[must_use]
pub fn init(db: &Database, templates: TemplateRegistry) -> RegisteredFeature {
    let store = ContentStore::new(db.clone(), templates);
    let media = MediaStore::new(db.clone());

    info!("Content slice initialized");

    RegisteredFeature::new(Content { store, media })
}
