//! Configuration structures for invoice computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{GstrError, Result};
use crate::tax::{Jurisdiction, TaxPolicy};

/// Main configuration for gstr.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GstrConfig {
    /// Tax computation configuration.
    pub tax: TaxConfig,

    /// Invoice numbering configuration.
    pub invoice: InvoiceConfig,

    /// Seller details printed on exports.
    pub company: CompanyConfig,
}

/// Tax computation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Seller's two-character state code.
    pub seller_jurisdiction: String,

    /// GST rate (percent) applied to freight.
    pub freight_tax_rate: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            seller_jurisdiction: "23".to_string(), // Madhya Pradesh
            freight_tax_rate: Decimal::from(18),
        }
    }
}

/// Invoice numbering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    /// Prefix of generated invoice numbers.
    pub number_prefix: String,

    /// Minimum digits of the sequence part.
    pub sequence_width: usize,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            number_prefix: "NLTE".to_string(),
            sequence_width: 3,
        }
    }
}

/// Seller details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    pub name: String,
    pub gstin: String,
    pub address: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "NEW LOTUS TEXTILE ELECTRONICS".to_string(),
            gstin: "23CAWPV8800M1ZT".to_string(),
            address: "Durgesh Vihar Colony, J.K. Road, Bhopal (M.P.) - 462023".to_string(),
        }
    }
}

impl GstrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the tax policy described by this configuration.
    pub fn tax_policy(&self) -> Result<TaxPolicy> {
        let seller = Jurisdiction::new(&self.tax.seller_jurisdiction).ok_or_else(|| {
            GstrError::Config(format!(
                "seller_jurisdiction must be a two-character state code, got {:?}",
                self.tax.seller_jurisdiction
            ))
        })?;

        if self.tax.freight_tax_rate.is_sign_negative()
            || self.tax.freight_tax_rate > Decimal::ONE_HUNDRED
        {
            return Err(GstrError::Config(format!(
                "freight_tax_rate must be between 0 and 100, got {}",
                self.tax.freight_tax_rate
            )));
        }

        Ok(TaxPolicy::new(seller, self.tax.freight_tax_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = GstrConfig::default().tax_policy().unwrap();
        assert_eq!(policy.seller_jurisdiction.as_str(), "23");
        assert_eq!(policy.freight_tax_rate, Decimal::from(18));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GstrConfig =
            serde_json::from_str(r#"{"tax":{"seller_jurisdiction":"27"}}"#).unwrap();
        assert_eq!(config.tax.seller_jurisdiction, "27");
        assert_eq!(config.tax.freight_tax_rate, Decimal::from(18));
        assert_eq!(config.invoice.number_prefix, "NLTE");
    }

    #[test]
    fn test_rejects_bad_jurisdiction() {
        let mut config = GstrConfig::default();
        config.tax.seller_jurisdiction = "MP4".to_string();
        assert!(matches!(config.tax_policy(), Err(GstrError::Config(_))));
    }

    #[test]
    fn test_rejects_freight_rate_out_of_range() {
        let mut config = GstrConfig::default();
        config.tax.freight_tax_rate = Decimal::from(101);
        assert!(matches!(config.tax_policy(), Err(GstrError::Config(_))));

        config.tax.freight_tax_rate = Decimal::from(-1);
        assert!(matches!(config.tax_policy(), Err(GstrError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = GstrConfig::default();
        config.invoice.number_prefix = "ACME".to_string();
        config.save(&path).unwrap();

        let loaded = GstrConfig::from_file(&path).unwrap();
        assert_eq!(loaded.invoice.number_prefix, "ACME");
    }
}
