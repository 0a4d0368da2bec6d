use crate::config::app::{ApplicationSettings, ApplicationSettingsModel, NAME_PORT};
use crate::config::database::{PostgresSettings, PostgresSettingsModel, NAME_POSTGRES};
use crate::config::environment::Environment;
use crate::config::tokens::{
    JwtSettings, JwtSettingsModel, NAME_ACCESS_SECRET, NAME_REFRESH_SECRET,
};
use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;
use std::env;
use tracing::{error, warn};

pub mod app;
pub mod database;
pub mod environment;
pub mod tokens;

const CONFIG_DIR: &str = "configuration";
const CONFIG_FILE_NAME: &str = "settings.toml";
const NAME_ENVIRONMENT: &str = "APP_ENVIRONMENT";

#[derive(Deserialize)]
pub struct SettingsModel {
    pub app: Option<ApplicationSettingsModel>,
    pub jwt: Option<JwtSettingsModel>,
    pub postgres: Option<PostgresSettingsModel>,
}

impl SettingsModel {
    fn parse() -> Result<Self, ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {e}")))?;
        let config_dir = base_path.join(CONFIG_DIR);
        let settings = Config::builder()
            .add_source(config::File::from(config_dir.join(CONFIG_FILE_NAME)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        settings.build()?.try_deserialize()
    }
}

#[derive(Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub jwt: JwtSettings,
    pub postgres: PostgresSettings,
    pub environment: Environment,
}

impl Settings {
    fn dev(model: SettingsModel) -> anyhow::Result<Self> {
        let app = model.app.map_or_else(
            || {
                warn!("Using default `app` settings!");
                Ok(ApplicationSettings::default())
            },
            |x| x.to_settings(),
        )?;

        let jwt = model.jwt.map_or_else(
            || {
                warn!("Using default `jwt` settings!");
                JwtSettings::default()
            },
            |x| x.to_settings(),
        );

        let postgres = model.postgres.map_or_else(
            || {
                warn!("Using default `postgres` settings (env url)!");
                PostgresSettings::from_env()
            },
            |x| x.to_settings(),
        )?;

        Ok(Self {
            app,
            jwt,
            postgres,
            environment: Environment::Development,
        })
    }

    fn prod() -> anyhow::Result<Self> {
        Ok(Self {
            app: ApplicationSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            postgres: PostgresSettings::from_env()?,
            environment: Environment::Production,
        })
    }
}

pub fn get_config() -> anyhow::Result<Settings> {
    let environment = match std::env::var(NAME_ENVIRONMENT) {
        Ok(env) => Environment::try_from(env).map_err(anyhow::Error::msg)?,
        Err(_) => Environment::Development,
    };

    match environment {
        Environment::Development => match SettingsModel::parse() {
            Ok(model) => Settings::dev(model),
            Err(e) => {
                error!("{e}\n - check {CONFIG_DIR}/{CONFIG_FILE_NAME} and .env.example");
                warn!("Using default configuration!");
                Ok(Settings {
                    app: ApplicationSettings::default(),
                    jwt: JwtSettings::default(),
                    postgres: PostgresSettings::from_env()?,
                    environment,
                })
            }
        },
        Environment::Production => {
            if !is_ok_env() {
                anyhow::bail!("Enter all required environment variables");
            }
            Settings::prod()
        }
    }
}

pub fn try_get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub fn get_env(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("Missing {name}"))
}

pub fn get_secret_env(name: &str) -> anyhow::Result<Secret<String>> {
    Ok(Secret::from(get_env(name)?))
}

fn is_ok_env() -> bool {
    let present: Vec<String> = env::vars().map(|(key, _)| key).collect();
    let required_variables = [
        NAME_PORT,
        NAME_POSTGRES,
        NAME_ACCESS_SECRET,
        NAME_REFRESH_SECRET,
    ];
    let missing: Vec<&str> = required_variables
        .into_iter()
        .filter(|var| !present.iter().any(|key| key == var))
        .collect();
    if missing.is_empty() {
        return true;
    }
    error!("Provide missing environment variables {missing:?}");
    false
}
