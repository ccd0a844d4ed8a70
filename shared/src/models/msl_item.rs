//! MSL (Must Selling List) item model

use serde::{Deserialize, Serialize};

/// One entry of a category's Must Selling List
///
/// (category, sku_code) is unique. Priority is ascending (1 = highest
/// importance); ties are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MslItem {
    pub category: String,
    pub sku_code: String,
    pub product_name: String,
    pub priority: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MslItem {
    pub fn new(
        category: impl Into<String>,
        sku_code: impl Into<String>,
        product_name: impl Into<String>,
        priority: u32,
    ) -> Self {
        Self {
            category: category.into(),
            sku_code: sku_code.into(),
            product_name: product_name.into(),
            priority,
            notes: None,
        }
    }

    /// Composite key used for in-file deduplication and replacement scoping
    pub fn key(&self) -> String {
        format!("{}::{}", self.category, self.sku_code)
    }
}
