use config::{Config, Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

/// Variable name the connection string has always been deployed under.
const MONGO_URI_VARIABLE: &str = "MONGO_URI";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub uri: Secret<String>,
    #[serde(default = "default_database_name")]
    pub database_name: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub server_selection_timeout_millis: Option<u64>,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub cors: CorsSettings,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CorsSettings {
    #[serde(default = "wildcard_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
}

impl CorsSettings {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: wildcard_origins(),
            allow_credentials: false,
        }
    }
}

fn default_database_name() -> String {
    "herdForm".into()
}

fn default_collection() -> String {
    "formData".into()
}

fn wildcard_origins() -> Vec<String> {
    vec!["*".into()]
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = Config::builder()
        .add_source(File::new("configuration.yaml", FileFormat::Yaml))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("database.uri", std::env::var(MONGO_URI_VARIABLE).ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}
