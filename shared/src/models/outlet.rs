//! Outlet (store) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A store on a salesman's territory
///
/// `store_code` is unique per owning salesman and globally unique for the
/// admin view. Only code, name and category are mandatory; the rest mirrors
/// the optional columns of the store CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlet {
    pub store_code: String,
    pub store_name: String,
    pub category: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub google_maps: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub avg_order_value: Option<Decimal>,
    #[serde(default)]
    pub order_frequency: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Outlet {
    pub fn new(
        store_code: impl Into<String>,
        store_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            store_code: store_code.into(),
            store_name: store_name.into(),
            category: category.into(),
            route: None,
            address: None,
            google_maps: None,
            phone: None,
            avg_order_value: None,
            order_frequency: None,
            contact_name: None,
            notes: None,
        }
    }
}
