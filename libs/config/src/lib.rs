//! # Pix Configuration
//!
//! Layered configuration for the payload generator: a base TOML file,
//! optional per-environment overrides and `PIX_` environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pix_config::load_config;
//!
//! let config = load_config(None, Some("production")).unwrap();
//! if let Some(payee) = &config.payee {
//!     println!("default key type: {}", payee.kind);
//! }
//! ```

pub mod pix_config;

// Re-export commonly used types
pub use pix_config::{
    load_config, GlobalConfig, MerchantSettings, PayeeSettings, PayloadSettings, PixConfig,
    DEFAULT_CONFIG_PATH,
};
