use self::database::get_postgres_pool;
use crate::config::app::ApplicationSettings;
use crate::config::environment::Environment;
use crate::config::get_config;
use crate::config::tokens::JwtSettings;
use axum::extract::FromRef;
use core::fmt::Display;
use sqlx::PgPool;
use std::net::SocketAddr;
use tracing::info;

pub mod database;
pub mod extractors;

pub struct Modules {
    pub app: ApplicationSettings,
    pool: PgPool,
    jwt: JwtSettings,
    environment: Environment,
}

impl Modules {
    pub async fn load_from_settings() -> anyhow::Result<Self> {
        let settings = get_config()?;
        info!("Settings loaded");
        info!("Loading modules");
        let pool = get_postgres_pool(settings.postgres).await?;
        info!("Modules loaded");
        Ok(Self {
            pool,
            app: settings.app,
            jwt: settings.jwt,
            environment: settings.environment,
        })
    }

    pub fn use_custom(
        pool: PgPool,
        addr: SocketAddr,
        access: &str,
        refresh: &str,
        environment: Environment,
    ) -> Self {
        Self {
            pool,
            app: ApplicationSettings::new(addr),
            jwt: JwtSettings::new(access, refresh),
            environment,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self)
    }
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub environment: Environment,
    pub pool: PgPool,
    pub jwt: JwtSettings,
}

impl AppState {
    fn new(modules: &Modules) -> Self {
        Self {
            environment: modules.environment,
            pool: modules.pool.clone(),
            jwt: modules.jwt.clone(),
        }
    }
}

impl Display for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} environment, postgres pool, token secrets", self.environment)
    }
}
