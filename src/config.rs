//! Configuration for the engine and the command-line caller.
//!
//! Values come from `RSA_CRYPTO_*` environment variables; every field has a
//! default, so an empty environment yields a working configuration.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::rsa::SignatureHash;

const ENV_PREFIX: &str = "RSA_CRYPTO";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Digest used by `sign`/`verify` (`RSA_CRYPTO_SIGNATURE_HASH`).
    #[serde(default)]
    pub signature_hash: SignatureHash,

    /// Tracing level when `RUST_LOG` is unset (`RSA_CRYPTO_LOG_LEVEL`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signature_hash: SignatureHash::default(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_source(source: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(source)
            .build()
            .context("failed to build configuration from environment")?;

        let c: EngineConfig = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        let level = self.log_level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "{}_LOG_LEVEL must be one of {}, got '{}'",
                ENV_PREFIX,
                LOG_LEVELS.join(", "),
                self.log_level
            );
        }
        Ok(())
    }
}
