//! MSL export serialization

use chrono::NaiveDate;
use shared::models::MslItem;

const EXPORT_HEADER: &str = "CATEGORY,SKU_CODE,PRODUCT_NAME,PRIORITY,NOTES";

/// Always-quoted field, embedded quotes doubled
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Code fields stay bare unless they contain a delimiter, quote or newline
fn code(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        quoted(field)
    } else {
        field.to_string()
    }
}

/// Serialize MSL items with the upload column set
///
/// Items are emitted grouped by category, ascending by priority within a
/// category, matching the display order of the MSL view. Free-text fields
/// (product name, notes) are always quoted; code fields only when they need
/// it. The output re-parses with the MSL schema to the same item count.
pub fn export_msl(items: &[MslItem]) -> String {
    let mut sorted: Vec<&MslItem> = items.iter().collect();
    sorted.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then(a.priority.cmp(&b.priority))
            .then(a.sku_code.cmp(&b.sku_code))
    });

    let mut out = String::with_capacity(EXPORT_HEADER.len() + 1 + sorted.len() * 48);
    out.push_str(EXPORT_HEADER);
    out.push('\n');
    for item in sorted {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            code(&item.category),
            code(&item.sku_code),
            quoted(&item.product_name),
            item.priority,
            quoted(item.notes.as_deref().unwrap_or("")),
        ));
    }
    out
}

/// File name for an MSL export taken on `date`
pub fn msl_export_filename(date: NaiveDate) -> String {
    format!("msl_export_{}.csv", date.format("%Y-%m-%d"))
}
