//! Stored payment-method records
//!
//! A payment method is what a merchant registers once and picks from when
//! charging: a payee key plus the company name shown to the payer. Storage is
//! behind [`PaymentMethodStore`]; [`InMemoryPaymentMethodStore`] is the
//! process-local implementation used by the CLI and tests.

use crate::common::errors::{KeyError, StoreError};
use crate::payee_key::{PayeeKey, PayeeKeyKind};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use uuid::Uuid;

/// A registered payee key with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub key_kind: PayeeKeyKind,
    pub key: String,
    pub company_name: String,
}

impl PaymentMethod {
    /// New record with a fresh id
    pub fn new(key_kind: PayeeKeyKind, key: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            key_kind,
            key: key.into(),
            company_name: company_name.into(),
        }
    }

    /// Validate the stored key
    pub fn payee_key(&self) -> Result<PayeeKey, KeyError> {
        PayeeKey::new(self.key_kind, &self.key)
    }
}

/// CRUD access to payment-method records
pub trait PaymentMethodStore: Send + Sync {
    /// All records, ordered by company name
    fn list(&self) -> Result<Vec<PaymentMethod>, StoreError>;

    fn get(&self, id: Uuid) -> Result<PaymentMethod, StoreError>;

    fn insert(&self, method: PaymentMethod) -> Result<Uuid, StoreError>;

    /// Replace the record with the same id
    fn update(&self, method: PaymentMethod) -> Result<(), StoreError>;

    fn delete(&self, id: Uuid) -> Result<PaymentMethod, StoreError>;

    /// First record whose company name matches, ignoring ASCII case
    fn find_by_company(&self, company_name: &str) -> Result<Option<PaymentMethod>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|m| m.company_name.eq_ignore_ascii_case(company_name.trim())))
    }
}

/// Payment-method store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryPaymentMethodStore {
    methods: RwLock<HashMap<Uuid, PaymentMethod>>,
}

impl InMemoryPaymentMethodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of records
    ///
    /// Records without an `id` get a fresh one. Keys are stored as given and
    /// validated when used.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let methods: Vec<PaymentMethod> = serde_json::from_reader(reader)
            .map_err(|e| StoreError::Backend(format!("invalid payment method JSON: {}", e)))?;

        let store = Self::new();
        for method in methods {
            store.insert(method)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.methods.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.read().is_empty()
    }
}

impl PaymentMethodStore for InMemoryPaymentMethodStore {
    fn list(&self) -> Result<Vec<PaymentMethod>, StoreError> {
        let mut methods: Vec<PaymentMethod> = self.methods.read().values().cloned().collect();
        methods.sort_by(|a, b| {
            a.company_name
                .cmp(&b.company_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(methods)
    }

    fn get(&self, id: Uuid) -> Result<PaymentMethod, StoreError> {
        self.methods
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn insert(&self, method: PaymentMethod) -> Result<Uuid, StoreError> {
        let mut methods = self.methods.write();
        if methods.contains_key(&method.id) {
            return Err(StoreError::Duplicate { id: method.id });
        }
        let id = method.id;
        methods.insert(id, method);
        Ok(id)
    }

    fn update(&self, method: PaymentMethod) -> Result<(), StoreError> {
        match self.methods.write().get_mut(&method.id) {
            Some(existing) => {
                *existing = method;
                Ok(())
            }
            None => Err(StoreError::NotFound { id: method.id }),
        }
    }

    fn delete(&self, id: Uuid) -> Result<PaymentMethod, StoreError> {
        self.methods
            .write()
            .remove(&id)
            .ok_or(StoreError::NotFound { id })
    }
}
