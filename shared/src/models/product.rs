//! Catalog product model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product
///
/// `sku_code` is unique across the catalog. Products are upserted by the CSV
/// flows and never deleted by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku_code: String,
    pub product_name: String,
    #[serde(default)]
    pub brand: String,
    pub category: String,
    /// Unit price, must be positive
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Default discount percentage, 0..=100
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount: Decimal,
}

impl Product {
    pub fn new(
        sku_code: impl Into<String>,
        product_name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            sku_code: sku_code.into(),
            product_name: product_name.into(),
            brand: String::new(),
            category: category.into(),
            unit_price,
            discount: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_fields_serialize_as_floats() {
        let mut product = Product::new("SKU-A", "Noodles", "GROCERY", "3500.5".parse().unwrap());
        product.discount = "12.5".parse().unwrap();

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["unit_price"], serde_json::json!(3500.5));
        assert_eq!(value["discount"], serde_json::json!(12.5));

        let back: Product = serde_json::from_value(value).unwrap();
        assert_eq!(back.unit_price, product.unit_price);
        assert_eq!(back.discount, product.discount);
    }
}
