//! Typed row decoders for the three upload variants
//!
//! Each decoder wraps the domain model it produces; the wrapper keeps the
//! schema constants and validation rules next to the CSV shape instead of
//! leaking them into `shared`.

use super::record::{CsvRecord, RawRecord};
use rust_decimal::Decimal;
use shared::models::{MslItem, Outlet, Product};

fn parse_decimal(value: &str) -> Option<Decimal> {
    value.parse::<Decimal>().ok()
}

// =============================================================================
// MSL upload: CATEGORY,SKU_CODE,PRODUCT_NAME,PRIORITY[,NOTES]
// =============================================================================

/// One row of an MSL upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MslRow(pub MslItem);

impl MslRow {
    pub fn into_inner(self) -> MslItem {
        self.0
    }
}

impl CsvRecord for MslRow {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["CATEGORY", "SKU_CODE", "PRODUCT_NAME", "PRIORITY"];
    const OPTIONAL_COLUMNS: &'static [&'static str] = &["NOTES"];

    fn dedup_key(raw: &RawRecord) -> String {
        format!("{}::{}", raw.get("CATEGORY"), raw.get("SKU_CODE"))
    }

    fn decode(raw: &RawRecord) -> Result<Self, String> {
        let priority: u32 = raw
            .get("PRIORITY")
            .parse()
            .map_err(|_| "priority must be a positive integer".to_string())?;
        if priority == 0 {
            return Err("priority must be a positive integer".into());
        }

        let mut item = MslItem::new(
            raw.get("CATEGORY"),
            raw.get("SKU_CODE"),
            raw.get("PRODUCT_NAME"),
            priority,
        );
        item.notes = raw.get_opt("NOTES").map(str::to_string);
        Ok(Self(item))
    }

    fn entity_key(&self) -> String {
        self.0.key()
    }
}

// =============================================================================
// Product upload: SKU_CODE,PRODUCT_NAME,BRAND,CATEGORY,PRICE[,DISCOUNT]
// =============================================================================

/// One row of a product catalog upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow(pub Product);

impl ProductRow {
    pub fn into_inner(self) -> Product {
        self.0
    }
}

impl CsvRecord for ProductRow {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["SKU_CODE", "PRODUCT_NAME", "BRAND", "CATEGORY", "PRICE"];
    const OPTIONAL_COLUMNS: &'static [&'static str] = &["DISCOUNT"];

    fn dedup_key(raw: &RawRecord) -> String {
        raw.get("SKU_CODE").to_string()
    }

    fn decode(raw: &RawRecord) -> Result<Self, String> {
        let price = parse_decimal(raw.get("PRICE"))
            .filter(|p| p > &Decimal::ZERO)
            .ok_or_else(|| "price must be a positive number".to_string())?;

        let discount = match raw.get_opt("DISCOUNT") {
            None => Decimal::ZERO,
            Some(v) => {
                let d =
                    parse_decimal(v).ok_or_else(|| "discount must be a number".to_string())?;
                if d < Decimal::ZERO || d > Decimal::ONE_HUNDRED {
                    return Err("discount must be between 0 and 100".into());
                }
                d
            }
        };

        let mut product = Product::new(
            raw.get("SKU_CODE"),
            raw.get("PRODUCT_NAME"),
            raw.get("CATEGORY"),
            price,
        );
        product.brand = raw.get("BRAND").to_string();
        product.discount = discount;
        Ok(Self(product))
    }

    fn entity_key(&self) -> String {
        self.0.sku_code.clone()
    }
}

// =============================================================================
// Store upload: KODE_TOKO,NAMA_TOKO,KATEGORI[,ALAMAT,GOOGLE_MAPS,ROUTE,
//               TELEPON,AVG_ORDER_VALUE,FREKUENSI_ORDER,KONTAK_UTAMA,CATATAN]
// =============================================================================

/// One row of a store upload (headers stay in the field format the sales
/// teams already use)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletRow(pub Outlet);

impl OutletRow {
    pub fn into_inner(self) -> Outlet {
        self.0
    }
}

impl CsvRecord for OutletRow {
    const REQUIRED_COLUMNS: &'static [&'static str] = &["KODE_TOKO", "NAMA_TOKO", "KATEGORI"];
    const OPTIONAL_COLUMNS: &'static [&'static str] = &[
        "ALAMAT",
        "GOOGLE_MAPS",
        "ROUTE",
        "TELEPON",
        "AVG_ORDER_VALUE",
        "FREKUENSI_ORDER",
        "KONTAK_UTAMA",
        "CATATAN",
    ];

    fn dedup_key(raw: &RawRecord) -> String {
        raw.get("KODE_TOKO").to_string()
    }

    fn decode(raw: &RawRecord) -> Result<Self, String> {
        let avg_order_value = match raw.get_opt("AVG_ORDER_VALUE") {
            None => None,
            Some(v) => Some(
                parse_decimal(v)
                    .filter(|d| d >= &Decimal::ZERO)
                    .ok_or_else(|| "average order value must be a non-negative number".to_string())?,
            ),
        };

        let mut outlet = Outlet::new(
            raw.get("KODE_TOKO"),
            raw.get("NAMA_TOKO"),
            raw.get("KATEGORI"),
        );
        outlet.address = raw.get_opt("ALAMAT").map(str::to_string);
        outlet.google_maps = raw.get_opt("GOOGLE_MAPS").map(str::to_string);
        outlet.route = raw.get_opt("ROUTE").map(str::to_string);
        outlet.phone = raw.get_opt("TELEPON").map(str::to_string);
        outlet.avg_order_value = avg_order_value;
        outlet.order_frequency = raw.get_opt("FREKUENSI_ORDER").map(str::to_string);
        outlet.contact_name = raw.get_opt("KONTAK_UTAMA").map(str::to_string);
        outlet.notes = raw.get_opt("CATATAN").map(str::to_string);
        Ok(Self(outlet))
    }

    fn entity_key(&self) -> String {
        self.0.store_code.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parser::{RowOutcome, parse};

    fn invalid_reason<T>(outcome: &RowOutcome<T>) -> &str {
        match outcome {
            RowOutcome::Invalid { reason } => reason,
            RowOutcome::Valid(_) => panic!("expected invalid row"),
        }
    }

    #[test]
    fn priority_zero_and_garbage_rejected() {
        let csv = "\
CATEGORY,SKU_CODE,PRODUCT_NAME,PRIORITY
GROCERY,SKU-A,Noodles,0
GROCERY,SKU-B,Oil,abc
GROCERY,SKU-C,Candy,3";
        let result = parse::<MslRow>(csv).unwrap();
        assert_eq!(result.valid_count, 1);
        assert_eq!(
            invalid_reason(&result.rows[0].outcome),
            "priority must be a positive integer"
        );
        assert_eq!(
            invalid_reason(&result.rows[1].outcome),
            "priority must be a positive integer"
        );
    }

    #[test]
    fn price_zero_and_non_numeric_rejected() {
        let csv = "\
SKU_CODE,PRODUCT_NAME,BRAND,CATEGORY,PRICE
SKU-A,Noodles,Indofood,GROCERY,0
SKU-B,Oil,Bimoli,GROCERY,cheap";
        let result = parse::<ProductRow>(csv).unwrap();
        assert_eq!(result.valid_count, 0);
        for row in &result.rows {
            assert_eq!(invalid_reason(&row.outcome), "price must be a positive number");
        }
    }

    #[test]
    fn discount_range_checked_and_defaulted() {
        let csv = "\
SKU_CODE,PRODUCT_NAME,BRAND,CATEGORY,PRICE,DISCOUNT
SKU-A,Noodles,Indofood,GROCERY,3500,150
SKU-B,Oil,Bimoli,GROCERY,18000,";
        let result = parse::<ProductRow>(csv).unwrap();
        assert_eq!(
            invalid_reason(&result.rows[0].outcome),
            "discount must be between 0 and 100"
        );
        match &result.rows[1].outcome {
            RowOutcome::Valid(row) => assert_eq!(row.0.discount, Decimal::ZERO),
            other => panic!("expected valid row, got {other:?}"),
        }
    }

    #[test]
    fn outlet_optional_columns_default() {
        let csv = "KODE_TOKO,NAMA_TOKO,KATEGORI\nTK-001,Toko Berkah,GROCERY";
        let result = parse::<OutletRow>(csv).unwrap();
        assert_eq!(result.valid_count, 1);
        let outlet = &result.valid_rows().next().unwrap().0;
        assert_eq!(outlet.store_code, "TK-001");
        assert!(outlet.route.is_none());
        assert!(outlet.avg_order_value.is_none());
    }

    #[test]
    fn outlet_full_column_set_decodes() {
        let csv = "\
KODE_TOKO,NAMA_TOKO,KATEGORI,ALAMAT,GOOGLE_MAPS,ROUTE,TELEPON,AVG_ORDER_VALUE,FREKUENSI_ORDER,KONTAK_UTAMA,CATATAN
TK-002,Warung Sari,KIOSK,\"Jl. Melati 5, Bandung\",https://maps.example/x,R-07,0812000111,250000,weekly,Ibu Sari,corner spot";
        let result = parse::<OutletRow>(csv).unwrap();
        let outlet = &result.valid_rows().next().unwrap().0;
        assert_eq!(outlet.address.as_deref(), Some("Jl. Melati 5, Bandung"));
        assert_eq!(outlet.route.as_deref(), Some("R-07"));
        assert_eq!(outlet.avg_order_value, Some("250000".parse().unwrap()));
    }
}
