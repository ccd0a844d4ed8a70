//! Visit and visit order models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A salesman's store visit
///
/// Created once per submission and never edited by the engine. A visit with
/// `has_order = true` is an "effective call" (EC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub visit_id: String,
    pub salesman_id: String,
    pub store_code: String,
    pub visit_date: NaiveDate,
    pub has_order: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Visit {
    pub fn new(
        salesman_id: impl Into<String>,
        store_code: impl Into<String>,
        visit_date: NaiveDate,
    ) -> Self {
        Self {
            visit_id: Uuid::new_v4().to_string(),
            salesman_id: salesman_id.into(),
            store_code: store_code.into(),
            visit_date,
            has_order: false,
            notes: None,
        }
    }
}

/// One order line attached to a visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitOrder {
    pub visit_id: String,
    pub sku_code: String,
    /// Must be > 0
    pub quantity: u32,
    /// Must be >= 0
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// 0..=100
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,
}

impl VisitOrder {
    pub fn new(
        visit_id: impl Into<String>,
        sku_code: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            visit_id: visit_id.into(),
            sku_code: sku_code.into(),
            quantity,
            unit_price,
            discount_percentage: Decimal::ZERO,
        }
    }

    /// Line total: quantity × unit_price × (1 − discount/100)
    pub fn line_total(&self) -> Decimal {
        let gross = Decimal::from(self.quantity) * self.unit_price;
        gross * (Decimal::ONE - self.discount_percentage / Decimal::ONE_HUNDRED)
    }
}
