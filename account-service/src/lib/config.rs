use std::env;
use std::fmt;

use auth::TokenService;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Signing secret used when none is configured outside production.
const DEVELOPMENT_SECRET: &str = "development-only-signing-secret-do-not-deploy";

const PRODUCTION_RUN_MODE: &str = "production";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub run_mode: String,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: Option<String>,
    pub expiration_hours: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080_i64)?
            .set_default("database.max_connections", 5_i64)?
            .set_default("jwt.expiration_hours", auth::jwt::DEFAULT_TOKEN_TTL_HOURS)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .set_override("run_mode", run_mode)?
            .build()?;

        configuration.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.run_mode == PRODUCTION_RUN_MODE
    }

    /// Resolve the token signing secret.
    ///
    /// A missing secret falls back to a fixed development value with a
    /// warning, except in production where it is a startup error. A secret
    /// that is set but blank is always an error.
    pub fn signing_secret(&self) -> Result<String, ConfigError> {
        match self.jwt.secret.as_deref() {
            Some(secret) if secret.trim().is_empty() => Err(ConfigError::Message(
                "jwt.secret is set but empty".to_string(),
            )),
            Some(secret) => Ok(secret.to_string()),
            None if self.is_production() => Err(ConfigError::Message(
                "jwt.secret must be set when RUN_MODE=production".to_string(),
            )),
            None => {
                tracing::warn!(
                    run_mode = %self.run_mode,
                    "No JWT secret configured, using the insecure development secret; set JWT__SECRET before deploying"
                );
                Ok(DEVELOPMENT_SECRET.to_string())
            }
        }
    }

    /// Build the token service from the resolved secret and configured lifetime.
    pub fn token_service(&self) -> Result<TokenService, ConfigError> {
        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be positive, got {}",
                self.jwt.expiration_hours
            )));
        }

        let secret = self.signing_secret()?;
        Ok(TokenService::new(secret.as_bytes())
            .with_ttl(chrono::Duration::hours(self.jwt.expiration_hours)))
    }
}
