use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::{Path, PathBuf};
use taste_rank::similarity::SimilarityWeights;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub storage: StorageSettings,
    pub scoring: ScoringSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApplicationSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageSettings {
    pub snapshot_path: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScoringSettings {
    pub system: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub k_factor: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub initial_rating: f64,
    // how many of the most similar users feed the social feed
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub feed_user_limit: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub similar_user_limit: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub discovery_limit: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_page_size: usize,
    #[serde(default)]
    pub weights: SimilarityWeights,
}

/// Reads `configuration/` under the current directory.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?
        .join("configuration");
    get_configuration_from(base_path)
}

/// Layers `base.yaml`, then the file for `APP_ENVIRONMENT` (local by
/// default), then `APP_`-prefixed environment variables such as
/// `APP_SCORING__K_FACTOR=24`.
pub fn get_configuration_from(
    configuration_directory: impl AsRef<Path>,
) -> Result<Settings, config::ConfigError> {
    let configuration_directory = configuration_directory.as_ref();
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
