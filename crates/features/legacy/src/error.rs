use std::borrow::Cow;
use tessera_domain::legacy::JobStatus;

/// A specialized [`LegacyError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum LegacyError {
    /// No mapping, override, or job with the requested key.
    #[error("Legacy record not found: {key}")]
    NotFound { key: Cow<'static, str> },

    /// Mappings are unique per (legacy article, content item) pair.
    #[error("Mapping already exists for legacy article {legacy_article_id} and content {content_id}")]
    DuplicateMapping { legacy_article_id: i64, content_id: String },

    /// Attempted transition or progress update on a finished job.
    #[error("Job {job_id} is already terminal ({status})")]
    Terminal { job_id: String, status: JobStatus },

    /// An exclusive job of the same kind is still running.
    #[error("A '{kind}' job is already running")]
    AlreadyRunning { kind: String },

    /// An override raw value does not parse as its declared data type.
    #[error("Invalid override value: {message}")]
    InvalidOverride { message: Cow<'static, str> },

    /// A stored record carries data the domain layer cannot read back.
    #[error("Corrupt legacy record: {message}")]
    Corrupt { message: Cow<'static, str> },

    /// A stored record could not be converted to or from its domain form.
    #[error("Legacy serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors surfaced by the backing store.
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}
