use std::borrow::Cow;
use tessera_templates::TemplateError;
use tessera_zones::validator::ZoneViolation;

/// A specialized [`ContentError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No content or media record with the requested id/slug.
    #[error("Content not found: {key}")]
    NotFound { key: Cow<'static, str> },

    /// Slugs are globally unique.
    #[error("Slug already in use: {slug}")]
    DuplicateSlug { slug: String },

    /// A stored record carries data the domain layer cannot read back.
    #[error("Corrupt content record: {message}")]
    Corrupt { message: Cow<'static, str> },

    /// Saving zone values whose required zones are missing or malformed.
    /// Malformed optional zones are accepted and degrade at render time.
    #[error("Zone payload rejected: {} required zone(s) failed validation", violations.len())]
    InvalidZones { violations: Vec<ZoneViolation> },

    /// Template lookups performed on behalf of content operations.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A stored record could not be converted to or from its domain form.
    #[error("Content serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors surfaced by the backing store.
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}
