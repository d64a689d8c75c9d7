pub use crate::config::{ConfigError, ConfigErrorExt, DEFAULT_CONFIG_FILE, ENV_PREFIX, load_config};
pub use evhub_domain::config::{AppConfig, BackendConfig, LoggingConfig, PlansConfig};
pub use evhub_domain::{Entity, EntityId, FeatureValue, Limit, LimitCheck, ResolvedPlan};
