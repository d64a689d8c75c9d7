//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it owns layered config loading and the common prelude.
//!
//! ## Config loading
//! ```rust,no_run
//! use evhub_kernel::config::load_config;
//! use evhub_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("evhub")).unwrap_or_default();
//! assert!(!cfg.plans.default_slug.is_empty());
//! ```
pub mod config;
pub mod prelude;

pub use evhub_domain as domain;
