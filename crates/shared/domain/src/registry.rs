//! Slice registry for modular features.
//! A minimal type-erased container holding pre-initialized feature state
//! (template registry, content store, job tracker) for the server state.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for feature state that can be shared across threads.
pub trait FeatureState: Any + Debug + Send + Sync {
    /// Human-readable slice name for diagnostics.
    fn name(&self) -> &'static str;

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A container for an initialized feature.
#[derive(Debug)]
pub struct RegisteredFeature {
    pub id: TypeId,
    pub state: Box<dyn FeatureState>,
}

impl RegisteredFeature {
    /// Create a registered feature from a concrete state.
    pub fn new<T: FeatureState>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }
}
