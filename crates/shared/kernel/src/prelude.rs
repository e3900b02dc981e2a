//! Convenience re-exports for feature slices.

pub use crate::config::{ConfigError, load_config};
pub use crate::safe_nanoid;
#[cfg(feature = "server")]
pub use crate::server::state::{ApiState, ApiStateError};
pub use tessera_domain::config::ApiConfig;
pub use tessera_domain::registry::{FeatureState, RegisteredFeature};
