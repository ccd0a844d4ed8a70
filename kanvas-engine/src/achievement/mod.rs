//! MSL achievement calculation
//!
//! Pure functions over in-memory snapshots. A store's achievement is the
//! share of its category's MSL SKUs it bought at least once during the
//! window; the overall figure is the unweighted mean over stores whose
//! category carries a non-empty MSL. Stores without an applicable list are
//! excluded from the denominator, not counted as zero.

pub mod service;

pub use service::{AchievementService, DateWindow};

use shared::models::MslItem;
use std::collections::{HashMap, HashSet};

/// Sort MSL items into display order: category, then ascending priority
///
/// Priority 1 is the most important item and renders first.
pub fn sort_for_display(items: &mut [MslItem]) {
    items.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then(a.priority.cmp(&b.priority))
            .then(a.sku_code.cmp(&b.sku_code))
    });
}

/// Index MSL items as category -> set of SKU codes
pub fn msl_index(items: &[MslItem]) -> HashMap<String, HashSet<String>> {
    let mut index: HashMap<String, HashSet<String>> = HashMap::new();
    for item in items {
        index
            .entry(item.category.clone())
            .or_default()
            .insert(item.sku_code.clone());
    }
    index
}

/// What one store did during the window
#[derive(Debug, Clone)]
pub struct StoreVisitFacts {
    pub store_code: String,
    /// Category from the outlet register; empty when the store is unknown
    pub store_category: String,
    /// Distinct SKUs bought across all visits in the window
    pub bought_skus: HashSet<String>,
}

/// One store's achievement against its category list
#[derive(Debug, Clone, PartialEq)]
pub struct StoreAchievement {
    pub store_code: String,
    pub store_category: String,
    /// MSL SKUs the store bought
    pub matched: usize,
    /// Size of the category's MSL
    pub target: usize,
    pub percentage: f64,
}

/// Aggregate achievement over a visit window
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementResult {
    /// Unweighted mean over included stores; 0.0 when none qualify
    pub overall: f64,
    pub included: usize,
    pub excluded: usize,
    pub stores: Vec<StoreAchievement>,
}

/// Score every visited store against the MSL index
///
/// Only SKUs on the store's category list count toward `matched`; off-list
/// purchases neither help nor hurt. Output order follows `facts`.
pub fn compute_achievement(
    index: &HashMap<String, HashSet<String>>,
    facts: &[StoreVisitFacts],
) -> AchievementResult {
    let mut stores = Vec::with_capacity(facts.len());
    let mut excluded = 0;
    let mut sum = 0.0;

    for fact in facts {
        let Some(targets) = index.get(&fact.store_category).filter(|t| !t.is_empty()) else {
            excluded += 1;
            continue;
        };

        let matched = targets.intersection(&fact.bought_skus).count();
        let percentage = matched as f64 / targets.len() as f64 * 100.0;
        sum += percentage;
        stores.push(StoreAchievement {
            store_code: fact.store_code.clone(),
            store_category: fact.store_category.clone(),
            matched,
            target: targets.len(),
            percentage,
        });
    }

    let included = stores.len();
    let overall = if included == 0 { 0.0 } else { sum / included as f64 };

    AchievementResult {
        overall,
        included,
        excluded,
        stores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(store: &str, category: &str, skus: &[&str]) -> StoreVisitFacts {
        StoreVisitFacts {
            store_code: store.into(),
            store_category: category.into(),
            bought_skus: skus.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn grocery_index() -> HashMap<String, HashSet<String>> {
        msl_index(&[
            MslItem::new("GROCERY", "SKU-A", "Instant Noodles", 1),
            MslItem::new("GROCERY", "SKU-B", "Cooking Oil 1L", 2),
            MslItem::new("GROCERY", "SKU-C", "Candy Mix", 3),
        ])
    }

    #[test]
    fn partial_match_scores_fraction_of_list() {
        let result = compute_achievement(
            &grocery_index(),
            &[facts("T-001", "GROCERY", &["SKU-A", "SKU-C"])],
        );
        assert_eq!(result.included, 1);
        assert_eq!(result.stores[0].matched, 2);
        assert_eq!(result.stores[0].target, 3);
        assert!((result.overall - 66.6667).abs() < 0.01);
    }

    #[test]
    fn zero_purchase_store_drags_the_mean() {
        let result = compute_achievement(
            &grocery_index(),
            &[
                facts("T-001", "GROCERY", &["SKU-A", "SKU-C"]),
                facts("T-002", "GROCERY", &[]),
            ],
        );
        assert_eq!(result.included, 2);
        assert!((result.overall - 33.3333).abs() < 0.01);
    }

    #[test]
    fn store_without_category_list_is_excluded() {
        let result = compute_achievement(
            &grocery_index(),
            &[facts("T-003", "HORECA", &["SKU-A"])],
        );
        assert_eq!(result.included, 0);
        assert_eq!(result.excluded, 1);
        assert_eq!(result.overall, 0.0);
        assert!(result.stores.is_empty());
    }

    #[test]
    fn off_list_purchases_do_not_count() {
        let result = compute_achievement(
            &grocery_index(),
            &[facts("T-001", "GROCERY", &["SKU-A", "SKU-X", "SKU-Y"])],
        );
        assert_eq!(result.stores[0].matched, 1);
        assert!((result.overall - 33.3333).abs() < 0.01);
    }

    #[test]
    fn no_facts_yields_zero_not_nan() {
        let result = compute_achievement(&grocery_index(), &[]);
        assert_eq!(result.overall, 0.0);
        assert_eq!(result.included, 0);
    }

    #[test]
    fn display_sort_is_category_then_priority() {
        let mut items = vec![
            MslItem::new("KIOSK", "SKU-D", "Soap Bar", 1),
            MslItem::new("GROCERY", "SKU-B", "Cooking Oil 1L", 3),
            MslItem::new("GROCERY", "SKU-A", "Instant Noodles", 1),
            MslItem::new("GROCERY", "SKU-C", "Candy Mix", 2),
        ];
        sort_for_display(&mut items);
        let keys: Vec<(&str, u32)> = items
            .iter()
            .map(|i| (i.sku_code.as_str(), i.priority))
            .collect();
        assert_eq!(
            keys,
            vec![("SKU-A", 1), ("SKU-C", 2), ("SKU-B", 3), ("SKU-D", 1)]
        );
    }
}
