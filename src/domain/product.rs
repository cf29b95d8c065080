//! Catalog product as delivered by the dropshipping supplier.
//!
//! Products are immutable once fetched; the shop never writes back to the
//! supplier catalog. The suggested cost arrives as a decimal string and is
//! only interpreted by the pricing module.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    /// Wholesale cost as a decimal string, e.g. "12.50". Unparseable or
    /// missing values price as zero rather than failing the whole listing.
    #[serde(default)]
    pub suggested_cost: String,
    #[serde(default)]
    pub weight_grams: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub inventory_count: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub expired: bool,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.inventory_count > 0 && !self.expired
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lipstick() -> Product {
        Product {
            id: "demo-001".into(),
            name: "Velvet Matte Lipstick".into(),
            sku: "LIP-VELVET-01".into(),
            suggested_cost: "12.50".into(),
            weight_grams: Some(38.0),
            color: Some("Rouge".into()),
            categories: vec!["lips".into()],
            inventory_count: 24,
            description: "Long-wear matte lipstick".into(),
            expired: false,
        }
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        assert!(lipstick().in_category("Lips"));
        assert!(!lipstick().in_category("face"));
    }

    #[test]
    fn test_expired_products_are_out_of_stock() {
        let mut p = lipstick();
        p.expired = true;
        assert!(!p.is_in_stock());
    }

    #[test]
    fn test_supplier_payload_with_missing_optionals_deserializes() {
        let p: Product = serde_json::from_str(r#"{"id":"x","name":"Blush","sku":"B-1"}"#).unwrap();
        assert_eq!(p.suggested_cost, "");
        assert_eq!(p.inventory_count, 0);
        assert!(!p.expired);
    }
}
