use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub token: TokenConfig,
    #[serde(default)]
    pub hasher: HasherConfig,
    pub mail: MailConfig,
}

/// Bearer-token signing settings.
///
/// The secret is loaded once at startup and injected into the token service;
/// rotating it is an explicit administrative action that invalidates every
/// outstanding token at once.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    #[serde(default = "default_validity_days")]
    pub validity_days: i64,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct HasherConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

/// Outbound-mail settings.
///
/// Transport wiring belongs to the MailDispatcher implementation; the core
/// only consumes `reset_url` as the base of recovery links.
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub reset_url: String,
}

fn default_validity_days() -> i64 {
    auth::token::handler::DEFAULT_VALIDITY_DAYS
}

// Argon2 RFC 9106 low-memory recommendation
fn default_memory_kib() -> u32 {
    19456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET, MAIL__HOST, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
