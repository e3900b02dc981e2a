use std::borrow::Cow;

/// A specialized [`TemplateError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Lookup by an identifier the registry does not know. This is the one
    /// hard failure of the registry: content cannot render without its
    /// template schema, so no fallback is substituted.
    #[error("Template not found: {identifier}")]
    NotFound { identifier: Cow<'static, str> },

    /// A stored record could not be converted to or from its domain form.
    #[error("Template serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors surfaced by the backing store.
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}
