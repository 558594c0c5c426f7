use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub models: ModelSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String { "predictions".to_string() }

/// Locations of the trained model artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_model_dir")]
    pub dir: String,
    #[serde(default = "default_gym_file")]
    pub gym_file: String,
    #[serde(default = "default_diet_file")]
    pub diet_file: String,
}

impl ModelSettings {
    pub fn gym_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.gym_file)
    }

    pub fn diet_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.diet_file)
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            dir: default_model_dir(),
            gym_file: default_gym_file(),
            diet_file: default_diet_file(),
        }
    }
}

fn default_model_dir() -> String { "model".to_string() }
fn default_gym_file() -> String { "gym_model.json".to_string() }
fn default_diet_file() -> String { "diet_model.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with COACH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with COACH_)
            // e.g., COACH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("COACH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute environment variables in string values
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("COACH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute environment variables in config values
///
/// The store endpoint and API key are commonly injected directly by the
/// deployment environment, so STORE_ENDPOINT / STORE_API_KEY are checked
/// before the COACH_-prefixed forms.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let store_endpoint = env::var("STORE_ENDPOINT")
        .or_else(|_| env::var("COACH_STORE__ENDPOINT"))
        .ok();
    let store_api_key = env::var("STORE_API_KEY")
        .or_else(|_| env::var("COACH_STORE__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = store_endpoint {
        builder = builder.set_override("store.endpoint", endpoint)?;
    }
    if let Some(api_key) = store_api_key {
        builder = builder.set_override("store.api_key", api_key)?;
    }

    builder.build()
}
