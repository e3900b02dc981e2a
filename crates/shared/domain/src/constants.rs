//! Shared string constants.

/// OpenAPI tag for system endpoints.
pub const SYSTEM_TAG: &str = "system";
/// OpenAPI tag for template endpoints.
pub const TEMPLATES_TAG: &str = "templates";
/// OpenAPI tag for content endpoints.
pub const CONTENT_TAG: &str = "content";
/// OpenAPI tag for migration job endpoints.
pub const JOBS_TAG: &str = "jobs";

/// Default page size for listing queries.
pub const DEFAULT_LIST_LIMIT: usize = 50;
