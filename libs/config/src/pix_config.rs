//! Pix Configuration Module
//!
//! Provides configuration loading for the payload generator. Supports loading
//! from TOML files with environment-specific overrides and `PIX_`-prefixed
//! environment variables.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use pix_types::PayeeKeyKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the base configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/pix.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PixConfig {
    /// Global settings
    #[serde(default)]
    pub global: GlobalConfig,

    /// Merchant shown on the payer's screen
    #[serde(default)]
    pub merchant: MerchantSettings,

    /// Default receiving key
    pub payee: Option<PayeeSettings>,

    /// Optional payload fields
    #[serde(default)]
    pub payload: PayloadSettings,
}

/// Global configuration settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GlobalConfig {
    pub log_level: String,
    /// JSON file with stored payment methods
    pub payment_methods_file: Option<PathBuf>,
}

/// Merchant display data, sanitized and truncated by the encoder
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MerchantSettings {
    pub name: Option<String>,
    pub city: Option<String>,
}

/// Receiving key settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PayeeSettings {
    pub kind: PayeeKeyKind,
    pub key: String,
    pub description: Option<String>,
}

/// Optional payload field settings
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PayloadSettings {
    /// Mark codes as single-use (point of initiation "12")
    #[serde(default)]
    pub dynamic: bool,
    pub reference_label: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            payment_methods_file: None,
        }
    }
}

impl PixConfig {
    /// Load configuration from files with environment overrides
    ///
    /// The base file is required when `base_path` is given and optional when
    /// falling back to [`DEFAULT_CONFIG_PATH`].
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let (base, required) = match base_path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        debug!("Loading Pix config from {:?} (required: {})", base, required);

        let mut builder = Config::builder().add_source(File::from(base.as_path()).required(required));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_dir = base
                .parent()
                .map(|p| p.join("environments"))
                .unwrap_or_else(|| PathBuf::from("config/environments"));
            let env_file = env_dir.join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (PIX_ prefix, e.g. PIX_MERCHANT__NAME)
        builder = builder.add_source(
            Environment::with_prefix("PIX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Expand `${VAR}` references in string values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        if let Some(name) = &self.merchant.name {
            let expanded = shellexpand::env(name).context("Failed to expand merchant name")?;
            self.merchant.name = Some(expanded.to_string());
        }

        if let Some(city) = &self.merchant.city {
            let expanded = shellexpand::env(city).context("Failed to expand merchant city")?;
            self.merchant.city = Some(expanded.to_string());
        }

        if let Some(payee) = &mut self.payee {
            let expanded = shellexpand::env(&payee.key).context("Failed to expand payee key")?;
            payee.key = expanded.to_string();
        }

        if let Some(file) = &self.global.payment_methods_file {
            let raw = file.to_string_lossy();
            let expanded =
                shellexpand::env(&raw).context("Failed to expand payment methods path")?;
            self.global.payment_methods_file = Some(PathBuf::from(expanded.as_ref()));
        }

        Ok(())
    }
}

/// Convenience function to load configuration with env var expansion
pub fn load_config(base_path: Option<&Path>, environment: Option<&str>) -> Result<PixConfig> {
    let mut config = PixConfig::load(base_path, environment)?;
    config.expand_env_vars()?;
    Ok(config)
}
