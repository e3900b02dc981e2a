//! Template definitions.

use crate::zone::ZoneDefinition;
use serde::{Deserialize, Serialize};

/// A named page layout with a declared set of zones.
///
/// Templates are seeded from the built-in definition list and are
/// read-mostly afterward. `identifier` is the stable lookup key; the
/// `zones` sequence defines rendering order top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub identifier: String,
    pub name: String,
    pub zones: Vec<ZoneDefinition>,
    /// Free-form schema describing template-level settings (not zone values).
    #[serde(default)]
    pub settings_schema: serde_json::Value,
    /// View path the presentation layer resolves this template to.
    pub view_path: String,
    pub category: String,
    pub active: bool,
    pub sort_order: i64,
}

impl Template {
    /// Looks up a zone definition by key.
    #[must_use]
    pub fn zone(&self, key: &str) -> Option<&ZoneDefinition> {
        self.zones.iter().find(|z| z.key == key)
    }
}
