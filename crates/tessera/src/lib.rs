//! Facade crate for Tessera features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] once at startup to seed templates and register feature
//!   slices; extend the function as new slices appear.

use tessera_database::Database;
pub use tessera_domain as domain;
use tessera_event_bus::EventBus;
pub use tessera_kernel as kernel;
pub use tessera_zones as zones;

pub mod server {
    pub mod router {
        pub use tessera_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use tessera_content as content;
    pub use tessera_legacy as legacy;
    pub use tessera_templates as templates;

    pub const ENABLED: &[&str] = &["templates", "content", "legacy"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all features: seed builtin templates, then wire the content
/// and legacy slices on top of the shared registry.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub async fn init(
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::RegisteredFeature>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Templates first: content depends on the registry handle.
    let (registry, templates) = features::templates::init(database).await?;
    slices.push(templates);

    // Content items, zone values, media.
    slices.push(features::content::init(database, registry));

    // Legacy article mappings and migration jobs.
    slices.push(features::legacy::init(database, events));

    Ok(slices)
}
