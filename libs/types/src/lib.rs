//! # Pix Domain Types
//!
//! Typed inputs of the Pix payload encoder and the payment-method records
//! they are usually drawn from.
//!
//! ## Design Philosophy
//!
//! - **Validated on construction**: a [`PayeeKey`] or [`TransactionAmount`]
//!   that exists is safe to encode; bad input fails at the boundary
//! - **No Precision Loss**: amounts are `rust_decimal::Decimal` at scale 2,
//!   never floats
//! - **Deterministic Sanitization**: merchant name and city are folded to
//!   ASCII and truncated, with the policy documented in [`merchant`]
//!
//! ## Quick Start
//!
//! ```rust
//! use pix_types::{MerchantProfile, PayeeKey, TransactionAmount};
//!
//! let key = PayeeKey::cnpj("12.345.678/0001-95").unwrap();
//! let merchant = MerchantProfile::new("Padaria São João", "São Paulo");
//! let amount = TransactionAmount::from_decimal_str("12.5").unwrap();
//!
//! assert_eq!(key.as_str(), "12345678000195");
//! assert_eq!(merchant.city(), "Sao Paulo");
//! assert_eq!(amount.to_string(), "12.50");
//! ```
//!
//! ## Integration Points
//!
//! - **pix-codec**: consumes `PayeeKey`, `MerchantProfile`, `TransactionAmount`
//! - **pix-config**: deserializes `PayeeKeyKind` from configuration files
//! - **pixgen**: resolves stored `PaymentMethod`s into payee keys

pub mod common;
pub mod merchant;
pub mod payee_key;
pub mod payment_method;

pub use common::{AmountError, KeyError, StoreError, TransactionAmount};
pub use merchant::{fold_to_ascii, truncate_chars, MerchantProfile};
pub use payee_key::{PayeeKey, PayeeKeyKind};
pub use payment_method::{InMemoryPaymentMethodStore, PaymentMethod, PaymentMethodStore};
