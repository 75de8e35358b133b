use anyhow::{anyhow, bail, Context, Result};
use pix_codec::{PixPayload, PixPayloadBuilder, PointOfInitiation};
use pix_config::PixConfig;
use pix_types::{
    InMemoryPaymentMethodStore, MerchantProfile, PayeeKey, PayeeKeyKind, PaymentMethod,
    PaymentMethodStore, TransactionAmount,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Per-invocation overrides, usually filled from the command line
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub kind: Option<PayeeKeyKind>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    /// Decimal text such as `"12.50"`
    pub amount: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub dynamic: bool,
    /// JSON file of stored payment methods, overrides the configured one
    pub payment_methods: Option<PathBuf>,
    /// Company name of the stored payment method to charge with
    pub company: Option<String>,
}

/// Fully resolved and validated inputs for one payload
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub key: PayeeKey,
    pub merchant: MerchantProfile,
    pub amount: Option<TransactionAmount>,
    pub description: Option<String>,
    pub reference_label: Option<String>,
    pub point_of_initiation: Option<PointOfInitiation>,
}

impl PaymentRequest {
    /// Resolve a request from options and configuration
    pub fn resolve(config: &PixConfig, options: &GenerateOptions) -> Result<Self> {
        let stored = match &options.company {
            Some(company) => Some(select_payment_method(config, options, company)?),
            None => None,
        };

        let key = resolve_key(config, options, stored.as_ref())?;

        let name = options
            .name
            .clone()
            .or_else(|| stored.as_ref().map(|m| m.company_name.clone()))
            .or_else(|| config.merchant.name.clone())
            .ok_or_else(|| anyhow!("Merchant name not set (use --name or [merchant] name)"))?;
        let city = options
            .city
            .clone()
            .or_else(|| config.merchant.city.clone())
            .ok_or_else(|| anyhow!("Merchant city not set (use --city or [merchant] city)"))?;
        let merchant = MerchantProfile::new(&name, &city);

        let amount = options
            .amount
            .as_deref()
            .map(TransactionAmount::from_decimal_str)
            .transpose()
            .context("Invalid --amount")?;

        // A configured description belongs to the configured key only
        let description = options.description.clone().or_else(|| {
            if options.key.is_some() || stored.is_some() {
                None
            } else {
                config.payee.as_ref().and_then(|p| p.description.clone())
            }
        });

        let reference_label = options
            .reference
            .clone()
            .or_else(|| config.payload.reference_label.clone());

        let point_of_initiation = (options.dynamic || config.payload.dynamic)
            .then_some(PointOfInitiation::Dynamic);

        debug!(
            "Resolved request: key={}, merchant={:?}, amount={:?}",
            key, merchant, amount
        );

        Ok(Self {
            key,
            merchant,
            amount,
            description,
            reference_label,
            point_of_initiation,
        })
    }

    /// Encode the request into a checksummed payload
    pub fn encode(self) -> Result<PixPayload> {
        let mut builder = PixPayloadBuilder::new(self.key, self.merchant);
        if let Some(amount) = self.amount {
            builder = builder.with_amount(amount);
        }
        if let Some(description) = self.description {
            builder = builder.with_description(description);
        }
        if let Some(label) = self.reference_label {
            builder = builder.with_reference_label(label);
        }
        if let Some(method) = self.point_of_initiation {
            builder = builder.with_point_of_initiation(method);
        }
        builder.build().context("Failed to build Pix payload")
    }
}

/// Load stored payment methods from a JSON file
pub fn load_payment_methods(path: &Path) -> Result<InMemoryPaymentMethodStore> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open payment methods file {:?}", path))?;
    let store = InMemoryPaymentMethodStore::from_json_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load payment methods from {:?}", path))?;
    info!("Loaded {} payment methods from {:?}", store.len(), path);
    Ok(store)
}

fn select_payment_method(
    config: &PixConfig,
    options: &GenerateOptions,
    company: &str,
) -> Result<PaymentMethod> {
    let path = options
        .payment_methods
        .as_deref()
        .or(config.global.payment_methods_file.as_deref())
        .ok_or_else(|| {
            anyhow!("--company requires --payment-methods or [global] payment_methods_file")
        })?;

    let store = load_payment_methods(path)?;
    find_company(&store, company)
}

fn find_company(store: &dyn PaymentMethodStore, company: &str) -> Result<PaymentMethod> {
    store
        .find_by_company(company)?
        .ok_or_else(|| anyhow!("No payment method registered for company '{}'", company))
}

fn resolve_key(
    config: &PixConfig,
    options: &GenerateOptions,
    stored: Option<&PaymentMethod>,
) -> Result<PayeeKey> {
    match (options.kind, options.key.as_deref()) {
        (Some(kind), Some(raw)) => return Ok(PayeeKey::new(kind, raw)?),
        (None, Some(_)) => bail!("--key requires --kind"),
        (Some(_), None) => bail!("--kind requires --key"),
        (None, None) => {}
    }

    if let Some(method) = stored {
        return method.payee_key().with_context(|| {
            format!("Stored payment method for '{}' has an invalid key", method.company_name)
        });
    }

    let payee = config
        .payee
        .as_ref()
        .ok_or_else(|| anyhow!("No payee key (use --kind/--key, --company or [payee])"))?;
    PayeeKey::new(payee.kind, &payee.key).context("Configured payee key is invalid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pix_codec::PayloadField;
    use pix_config::{MerchantSettings, PayeeSettings, PayloadSettings};
    use std::io::Write;

    fn base_config() -> PixConfig {
        PixConfig {
            merchant: MerchantSettings {
                name: Some("Loja Teste".to_string()),
                city: Some("SAO PAULO".to_string()),
            },
            payee: Some(PayeeSettings {
                kind: PayeeKeyKind::Cnpj,
                key: "12.345.678/0001-95".to_string(),
                description: None,
            }),
            ..PixConfig::default()
        }
    }

    #[test]
    fn test_config_only_request() {
        let request = PaymentRequest::resolve(&base_config(), &GenerateOptions::default()).unwrap();
        let payload = request.encode().unwrap();
        assert_eq!(
            payload.as_str(),
            "00020126360014br.gov.bcb.pix0114123456780001955204000053039865802BR5910Loja Teste6009SAO PAULO6304A92C"
        );
    }

    #[test]
    fn test_options_override_config() {
        let options = GenerateOptions {
            amount: Some("12.50".to_string()),
            reference: Some("PEDIDO123".to_string()),
            ..GenerateOptions::default()
        };
        let payload = PaymentRequest::resolve(&base_config(), &options)
            .unwrap()
            .encode()
            .unwrap();
        assert!(payload.as_str().ends_with("62130509PEDIDO1236304C85F"));
        assert_eq!(payload.field(PayloadField::TransactionAmount).unwrap().value(), "12.50");
    }

    #[test]
    fn test_dynamic_with_explicit_key() {
        let options = GenerateOptions {
            kind: Some(PayeeKeyKind::Cpf),
            key: Some("529.982.247-25".to_string()),
            name: Some("Fulano de Tal".to_string()),
            city: Some("BRASILIA".to_string()),
            amount: Some("7".to_string()),
            description: Some("Pagamento".to_string()),
            reference: Some("***".to_string()),
            dynamic: true,
            ..GenerateOptions::default()
        };
        let payload = PaymentRequest::resolve(&PixConfig::default(), &options)
            .unwrap()
            .encode()
            .unwrap();
        assert_eq!(
            payload.as_str(),
            "00020101021226460014br.gov.bcb.pix0111529982247250209Pagamento52040000530398654047.005802BR5913Fulano de Tal6008BRASILIA62070503***6304BECC"
        );
    }

    #[test]
    fn test_key_without_kind_rejected() {
        let options = GenerateOptions {
            key: Some("12345678000195".to_string()),
            ..GenerateOptions::default()
        };
        assert!(PaymentRequest::resolve(&base_config(), &options).is_err());
    }

    #[test]
    fn test_missing_key_and_merchant() {
        let err = PaymentRequest::resolve(&PixConfig::default(), &GenerateOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("No payee key"));

        let config = PixConfig {
            merchant: MerchantSettings::default(),
            ..base_config()
        };
        let err = PaymentRequest::resolve(&config, &GenerateOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Merchant name"));
    }

    #[test]
    fn test_invalid_amount_is_error() {
        let options = GenerateOptions {
            amount: Some("-1".to_string()),
            ..GenerateOptions::default()
        };
        assert!(PaymentRequest::resolve(&base_config(), &options).is_err());
    }

    #[test]
    fn test_config_payload_settings() {
        let config = PixConfig {
            payload: PayloadSettings {
                dynamic: true,
                reference_label: Some("CAIXA01".to_string()),
            },
            ..base_config()
        };
        let request = PaymentRequest::resolve(&config, &GenerateOptions::default()).unwrap();
        assert_eq!(request.point_of_initiation, Some(PointOfInitiation::Dynamic));
        assert_eq!(request.reference_label.as_deref(), Some("CAIXA01"));
    }

    #[test]
    fn test_stored_payment_method_selected_by_company() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"key_kind": "phone", "key": "(61) 91234-5678", "company_name": "Fulano de Tal"}},
                {{"key_kind": "cnpj", "key": "11.222.333/0001-81", "company_name": "Outra Loja"}}
            ]"#
        )
        .unwrap();

        let options = GenerateOptions {
            payment_methods: Some(file.path().to_path_buf()),
            company: Some("fulano de tal".to_string()),
            city: Some("BRASILIA".to_string()),
            ..GenerateOptions::default()
        };
        let request = PaymentRequest::resolve(&PixConfig::default(), &options).unwrap();
        assert_eq!(request.key.kind(), PayeeKeyKind::Phone);
        assert_eq!(request.merchant.name(), "Fulano de Tal");

        let payload = request.encode().unwrap();
        assert_eq!(
            payload.as_str(),
            "00020126360014br.gov.bcb.pix0114+55619123456785204000053039865802BR5913Fulano de Tal6008BRASILIA6304CFC5"
        );
    }

    #[test]
    fn test_unknown_company_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let options = GenerateOptions {
            payment_methods: Some(file.path().to_path_buf()),
            company: Some("Ninguem".to_string()),
            ..GenerateOptions::default()
        };
        let err = PaymentRequest::resolve(&base_config(), &options).unwrap_err();
        assert!(err.to_string().contains("Ninguem"));
    }

    #[test]
    fn test_company_without_store_is_error() {
        let options = GenerateOptions {
            company: Some("Loja Teste".to_string()),
            ..GenerateOptions::default()
        };
        assert!(PaymentRequest::resolve(&base_config(), &options).is_err());
    }
}
