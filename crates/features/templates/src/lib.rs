//! Template registry feature slice.
//!
//! Templates are declared in code (see [`builtin_templates`]) and persisted
//! into the backing store on startup via an idempotent upsert keyed by
//! identifier. Lookups go through a small in-process cache since templates
//! are read-mostly after seeding.

mod error;

pub use error::TemplateError;

use moka::sync::Cache;
use serde_json::json;
use std::any::Any;
use std::time::Duration;
use surrealdb_types::SurrealValue;
use tessera_database::Database;
use tessera_domain::registry::{FeatureState, RegisteredFeature};
use tessera_domain::template::Template;
use tessera_domain::zone::{ZoneDefinition, ZoneKind};
use tracing::{debug, info};

/// Upper bound on cached templates; the builtin set is far below this.
const CACHE_CAPACITY: u64 = 256;
const CACHE_TTL_SECS: u64 = 300;

/// Storage form of a [`Template`]. Structured fields are kept as JSON text
/// so the record stays flat for the engine.
#[derive(Debug, SurrealValue)]
struct TemplateRecord {
    identifier: String,
    name: String,
    zones: String,
    settings_schema: String,
    view_path: String,
    category: String,
    active: bool,
    sort_order: i64,
}

impl TemplateRecord {
    fn from_template(template: &Template) -> Result<Self, TemplateError> {
        Ok(Self {
            identifier: template.identifier.clone(),
            name: template.name.clone(),
            zones: serde_json::to_string(&template.zones)?,
            settings_schema: serde_json::to_string(&template.settings_schema)?,
            view_path: template.view_path.clone(),
            category: template.category.clone(),
            active: template.active,
            sort_order: template.sort_order,
        })
    }

    fn into_template(self) -> Result<Template, TemplateError> {
        Ok(Template {
            identifier: self.identifier,
            name: self.name,
            zones: serde_json::from_str(&self.zones)?,
            settings_schema: serde_json::from_str(&self.settings_schema)?,
            view_path: self.view_path,
            category: self.category,
            active: self.active,
            sort_order: self.sort_order,
        })
    }
}

/// Persistent registry of page templates with an in-process read cache.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    db: Database,
    cache: Cache<String, Template>,
}

impl TemplateRegistry {
    #[must_use]
    pub fn new(db: Database) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
            .build();
        Self { db, cache }
    }

    /// Upserts a template keyed by its identifier.
    ///
    /// # Errors
    /// Returns [`TemplateError::Serialization`] if the schema cannot be
    /// encoded, or [`TemplateError::Database`] on store failures.
    pub async fn register(&self, template: &Template) -> Result<(), TemplateError> {
        let record = TemplateRecord::from_template(template)?;

        self.db
            .query("UPSERT type::record('template', $identifier) CONTENT $record")
            .bind(("identifier", template.identifier.clone()))
            .bind(("record", record))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        self.cache.invalidate(&template.identifier);
        debug!(identifier = %template.identifier, "Template registered");
        Ok(())
    }

    /// Seeds every builtin template. Safe to call on every startup.
    ///
    /// # Errors
    /// Returns the first registration failure.
    pub async fn ensure_registered(&self, templates: &[Template]) -> Result<(), TemplateError> {
        for template in templates {
            self.register(template).await?;
        }
        Ok(())
    }

    /// Looks up a template by identifier.
    ///
    /// # Errors
    /// Returns [`TemplateError::NotFound`] for unknown identifiers. No
    /// fallback template is ever substituted.
    pub async fn get(&self, identifier: &str) -> Result<Template, TemplateError> {
        if let Some(template) = self.cache.get(identifier) {
            return Ok(template);
        }

        let record = self
            .db
            .query("SELECT * FROM ONLY type::record('template', $identifier)")
            .bind(("identifier", identifier.to_owned()))
            .await?
            .take::<Option<TemplateRecord>>(0)?
            .ok_or_else(|| TemplateError::NotFound { identifier: identifier.to_owned().into() })?;

        let template = record.into_template()?;
        self.cache.insert(identifier.to_owned(), template.clone());
        Ok(template)
    }

    /// Lists templates ordered by `sort_order`, optionally only active ones.
    ///
    /// # Errors
    /// Returns [`TemplateError::Database`] on store failures.
    pub async fn list(&self, active_only: bool) -> Result<Vec<Template>, TemplateError> {
        let query = if active_only {
            "SELECT * FROM template WHERE active = true ORDER BY sort_order, identifier"
        } else {
            "SELECT * FROM template ORDER BY sort_order, identifier"
        };

        let records = self.db.query(query).await?.take::<Vec<TemplateRecord>>(0)?;

        records.into_iter().map(TemplateRecord::into_template).collect()
    }
}

/// Templates feature state.
#[derive(Debug)]
pub struct Templates {
    registry: TemplateRegistry,
}

impl Templates {
    #[must_use]
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }
}

impl FeatureState for Templates {
    fn name(&self) -> &'static str {
        "templates"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the templates feature: seed the builtin set and expose the
/// registry both as a slice and as a handle for downstream slices.
///
/// # Errors
/// Returns an error if seeding the builtin templates fails.
pub async fn init(db: &Database) -> Result<(TemplateRegistry, RegisteredFeature), TemplateError> {
    let registry = TemplateRegistry::new(db.clone());
    registry.ensure_registered(&builtin_templates()).await?;

    info!("Templates slice initialized");

    let slice = RegisteredFeature::new(Templates { registry: registry.clone() });
    Ok((registry, slice))
}

/// The in-code template set persisted at startup.
#[must_use]
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            identifier: "landing".to_owned(),
            name: "Landing Page".to_owned(),
            zones: vec![
                ZoneDefinition::new("hero", ZoneKind::RichText, "Hero banner").required(),
                ZoneDefinition::new("features", ZoneKind::Repeater, "Feature cards"),
                ZoneDefinition::new("gallery", ZoneKind::MediaGallery, "Image gallery"),
                ZoneDefinition::new("cta_links", ZoneKind::LinkList, "Call to action links"),
            ],
            settings_schema: json!({
                "hero_height": { "type": "string", "default": "large" },
                "show_breadcrumbs": { "type": "boolean", "default": false }
            }),
            view_path: "pages/landing".to_owned(),
            category: "marketing".to_owned(),
            active: true,
            sort_order: 10,
        },
        Template {
            identifier: "article".to_owned(),
            name: "Article".to_owned(),
            zones: vec![
                ZoneDefinition::new("body", ZoneKind::RichText, "Article body").required(),
                ZoneDefinition::new("teaser", ZoneKind::Conditional, "Teaser override"),
                ZoneDefinition::new("attachments", ZoneKind::FileList, "Downloads"),
                ZoneDefinition::new("related", ZoneKind::LinkList, "Related articles"),
            ],
            settings_schema: json!({
                "show_author": { "type": "boolean", "default": true }
            }),
            view_path: "pages/article".to_owned(),
            category: "editorial".to_owned(),
            active: true,
            sort_order: 20,
        },
        Template {
            identifier: "contact".to_owned(),
            name: "Contact Page".to_owned(),
            zones: vec![
                ZoneDefinition::new("intro", ZoneKind::RichText, "Introduction"),
                ZoneDefinition::new("form", ZoneKind::FormEmbed, "Contact form").required(),
            ],
            settings_schema: json!({}),
            view_path: "pages/contact".to_owned(),
            category: "system".to_owned(),
            active: true,
            sort_order: 30,
        },
    ]
}
