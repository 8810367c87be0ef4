use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use backdate_core::AppError;
use chrono::FixedOffset;
use tracing_subscriber::EnvFilter;

const MIN_HOOK_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub hook_shared_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub utc_offset: FixedOffset,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        if migrate_only && database_url.is_none() {
            return Err(AppError::Validation(
                "DATABASE_URL is required to run migrations".to_owned(),
            ));
        }

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(10);

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let hook_shared_secret = required_non_empty_env("HOOK_SHARED_SECRET")?;
        if hook_shared_secret.len() < MIN_HOOK_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "HOOK_SHARED_SECRET must be at least {MIN_HOOK_SECRET_LENGTH} characters"
            )));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let utc_offset = parse_utc_offset(
            env::var("BACKDATE_UTC_OFFSET")
                .unwrap_or_else(|_| "+00:00".to_owned())
                .as_str(),
        )?;

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            hook_shared_secret,
            api_host,
            api_port,
            utc_offset,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_utc_offset(value: &str) -> Result<FixedOffset, AppError> {
    FixedOffset::from_str(value.trim()).map_err(|error| {
        AppError::Validation(format!("invalid BACKDATE_UTC_OFFSET '{value}': {error}"))
    })
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
