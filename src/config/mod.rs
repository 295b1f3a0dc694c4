use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// One year; longer sessions are a misconfiguration.
pub const MAX_TOKEN_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allow_any_origin: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    pub max_age: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
}

fn with_defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("environment", environment)?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8000)?
        .set_default("server.workers", num_cpus::get() as i64)?
        .set_default("auth.jwt_secret", "development_secret")?
        .set_default("auth.token_expiry_minutes", 30)?
        .set_default("cors.enabled", true)?
        .set_default("cors.allow_any_origin", true)?
        .set_default("cors.allowed_origins", Vec::<String>::new())?
        .set_default("cors.max_age", 3600)?
        .set_default("log.level", "info")
}

fn env_source() -> Environment {
    // E.g., `APP_SERVER__PORT=5001` would set `Settings.server.port`
    Environment::with_prefix("app")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Loads defaults, then `config/default`, then `config/{RUN_MODE}`, then
    /// `APP_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let settings: Settings = with_defaults("development")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Built-in defaults only; no files and no environment.
    pub fn new_for_test() -> Result<Self, ConfigError> {
        let settings: Settings = with_defaults("test")?
            .set_override("auth.jwt_secret", "test_secret")?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must not be empty".into()));
        }
        if self.auth.token_expiry_minutes <= 0 {
            return Err(ConfigError::Message(
                "auth.token_expiry_minutes must be positive".into(),
            ));
        }
        if self.auth.token_expiry_minutes > MAX_TOKEN_EXPIRY_MINUTES {
            return Err(ConfigError::Message(format!(
                "auth.token_expiry_minutes must not exceed {}",
                MAX_TOKEN_EXPIRY_MINUTES
            )));
        }
        Ok(())
    }
}
