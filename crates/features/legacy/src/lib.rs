//! Legacy article integration feature slice.
//!
//! Two concerns live here: mapping rows that link external legacy articles
//! to content items (with typed per-field overrides), and tracking of the
//! bulk migration jobs that move content across.

mod error;
mod jobs;
mod mappings;
mod overrides;

pub use error::LegacyError;
pub use jobs::{JobProgress, JobTracker};
pub use mappings::MappingStore;
pub use overrides::{FieldOverride, OverrideValue};

use std::any::Any;
use tessera_database::Database;
use tessera_domain::registry::{FeatureState, RegisteredFeature};
use tessera_event_bus::EventBus;
use tracing::info;

/// Legacy integration feature state.
#[derive(Debug)]
pub struct Legacy {
    mappings: MappingStore,
    jobs: JobTracker,
}

impl Legacy {
    #[must_use]
    pub const fn mappings(&self) -> &MappingStore {
        &self.mappings
    }

    #[must_use]
    pub const fn jobs(&self) -> &JobTracker {
        &self.jobs
    }
}

impl FeatureState for Legacy {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the legacy integration feature.
#[must_use]
pub fn init(db: &Database, events: &EventBus) -> RegisteredFeature {
    let mappings = MappingStore::new(db.clone());
    let jobs = JobTracker::new(db.clone(), events.clone());

    info!("Legacy slice initialized");

    RegisteredFeature::new(Legacy { mappings, jobs })
}
