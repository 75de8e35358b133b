//! Pixgen - payment request resolution for the `pixgen` binary
//!
//! Merges command-line options, stored payment methods and [`PixConfig`]
//! defaults into a [`PaymentRequest`], then encodes it with `pix-codec`.
//! Command-line values take precedence over a selected payment method, which
//! takes precedence over the configuration file.

pub mod request;

pub use request::{load_payment_methods, GenerateOptions, PaymentRequest};
