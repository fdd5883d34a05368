// Serialized form of the product catalogue.
//
// The domain `Product` enforces its invariants through validated types; this
// module holds the plain on-disk shape and the conversions between the two.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Product, domain::validate_name};

/// The serialized versions of the catalogue file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
pub(crate) enum CatalogueFile {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        products: Vec<ProductRecord>,
    },
}

impl CatalogueFile {
    pub(crate) fn into_records(self) -> Vec<ProductRecord> {
        match self {
            Self::V1 { products } => products,
        }
    }
}

impl From<Vec<ProductRecord>> for CatalogueFile {
    fn from(products: Vec<ProductRecord>) -> Self {
        Self::V1 { products }
    }
}

/// One product as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ProductRecord {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) opened: NaiveDate,
    pub(crate) pao_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) owner: Option<String>,
}

/// A stored record that does not describe a valid product.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    /// The record has an empty name.
    #[error("product {0} has an empty name")]
    EmptyName(Uuid),

    /// The record has a zero Period After Opening.
    #[error("product {0} has a period after opening of zero days")]
    ZeroPao(Uuid),
}

impl TryFrom<ProductRecord> for Product {
    type Error = RecordError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let name = validate_name(record.name).map_err(|_| RecordError::EmptyName(record.id))?;
        let pao_days = NonZeroU32::new(record.pao_days).ok_or(RecordError::ZeroPao(record.id))?;
        Ok(Self::from_parts(
            record.id,
            name,
            record.opened,
            pao_days,
            record.owner,
        ))
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            opened: product.opened(),
            pao_days: product.pao_days().get(),
            owner: product.owner().map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, pao_days: u32) -> ProductRecord {
        ProductRecord {
            id: Uuid::nil(),
            name: name.to_string(),
            opened: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            pao_days,
            owner: Some("alice".to_string()),
        }
    }

    #[test]
    fn valid_record_converts() {
        let product = Product::try_from(record("Lip balm", 365)).unwrap();
        assert_eq!(product.name(), "Lip balm");
        assert_eq!(product.owner(), Some("alice"));
        assert_eq!(ProductRecord::from(&product), record("Lip balm", 365));
    }

    #[test]
    fn invalid_records_are_rejected() {
        assert_eq!(
            Product::try_from(record("", 30)).unwrap_err(),
            RecordError::EmptyName(Uuid::nil())
        );
        assert_eq!(
            Product::try_from(record("   ", 30)).unwrap_err(),
            RecordError::EmptyName(Uuid::nil())
        );
        assert_eq!(
            Product::try_from(record("Lip balm", 0)).unwrap_err(),
            RecordError::ZeroPao(Uuid::nil())
        );
    }

    #[test]
    fn stored_names_are_trimmed() {
        let product = Product::try_from(record("  Lip balm \n", 365)).unwrap();
        assert_eq!(product.name(), "Lip balm");
    }

    #[test]
    fn yaml_shape() {
        let file = CatalogueFile::from(vec![record("Lip balm", 365)]);
        let yaml = serde_yaml::to_string(&file).unwrap();
        assert!(yaml.starts_with("_version:"));
        assert!(yaml.contains("pao_days: 365"));

        let parsed: CatalogueFile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.into_records(), vec![record("Lip balm", 365)]);
    }
}
