use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file stem looked up when no explicit path is given (`evhub.toml`, `evhub.json`, ...).
pub const DEFAULT_CONFIG_FILE: &str = "evhub";

/// Prefix of environment overrides, e.g. `EVHUB__BACKEND__APP_ID`.
pub const ENV_PREFIX: &str = "EVHUB";

#[evhub_derive::evhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a config file overlaid with `EVHUB__*` environment variables.
///
/// The file is required; its format is inferred from the extension, so `path` may be a stem
/// (`"config/local"`) or a full file name. Nested keys use a double underscore separator:
/// `EVHUB__PLANS__DEFAULT_SLUG=pro` maps to `plans.default_slug`.
///
/// # Errors
/// * the file (or default `evhub` file) cannot be found or parsed;
/// * the merged sources do not match the shape of `T`.
///
/// # Example
/// ```rust,no_run
/// use evhub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct CliConfig {
///     verbose: bool,
/// }
///
/// let cfg: CliConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
