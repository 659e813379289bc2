use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use nexus_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_SESSION_INACTIVITY_MINUTES: i64 = 30;
const DEFAULT_DIRECTOR_NAME: &str = "Diretor";

/// Credentials used to seed the first active director.
#[derive(Debug, Clone)]
pub struct BootstrapDirectorConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub session_inactivity_minutes: i64,
    pub bootstrap_director: Option<BootstrapDirectorConfig>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");
        let session_inactivity_minutes =
            parse_inactivity_minutes(env::var("SESSION_INACTIVITY_MINUTES").ok().as_deref())?;

        let bootstrap_director = bootstrap_director_config(
            optional_env("BOOTSTRAP_DIRECTOR_NAME"),
            optional_env("BOOTSTRAP_DIRECTOR_EMAIL"),
            optional_env("BOOTSTRAP_DIRECTOR_PASSWORD"),
        )?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            cookie_secure,
            session_inactivity_minutes,
            bootstrap_director,
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

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_inactivity_minutes(value: Option<&str>) -> Result<i64, AppError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(DEFAULT_SESSION_INACTIVITY_MINUTES);
    };

    match value.parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(AppError::Validation(format!(
            "SESSION_INACTIVITY_MINUTES must be a positive integer, got '{value}'"
        ))),
    }
}

fn bootstrap_director_config(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<Option<BootstrapDirectorConfig>, AppError> {
    match (email, password) {
        (Some(email), Some(password)) => Ok(Some(BootstrapDirectorConfig {
            name: name.unwrap_or_else(|| DEFAULT_DIRECTOR_NAME.to_owned()),
            email,
            password,
        })),
        (None, None) => Ok(None),
        _ => Err(AppError::Validation(
            "BOOTSTRAP_DIRECTOR_EMAIL and BOOTSTRAP_DIRECTOR_PASSWORD must be set together"
                .to_owned(),
        )),
    }
}
