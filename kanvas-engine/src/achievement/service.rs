//! Achievement read-aggregate service

use super::{AchievementResult, StoreVisitFacts, compute_achievement, msl_index};
use crate::store::{MslRepository, OutletRepository, StoreResult, VisitRepository};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Inclusive date range of an achievement report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Window covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    /// Window covering one calendar month
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            from,
            to: next_month.pred_opt()?,
        })
    }
}

/// Computes achievement reports from the store
///
/// Reads the MSL, outlet register and the window's visits, aggregates each
/// visited store's distinct bought SKUs, and hands the snapshots to
/// [`compute_achievement`].
#[derive(Clone)]
pub struct AchievementService {
    msl: MslRepository,
    outlets: OutletRepository,
    visits: VisitRepository,
}

impl AchievementService {
    pub fn new(msl: MslRepository, outlets: OutletRepository, visits: VisitRepository) -> Self {
        Self {
            msl,
            outlets,
            visits,
        }
    }

    pub async fn compute_for_window(&self, window: DateWindow) -> StoreResult<AchievementResult> {
        let index = msl_index(&self.msl.find_all().await?);

        let categories: HashMap<String, String> = self
            .outlets
            .find_all()
            .await?
            .into_iter()
            .map(|o| (o.store_code, o.category))
            .collect();

        let visits = self.visits.visits_between(window.from, window.to).await?;
        tracing::debug!(
            from = %window.from,
            to = %window.to,
            visits = visits.len(),
            "Computing achievement window"
        );

        // Visits fold into one bought-SKU set per store; revisits do not
        // double-count.
        let mut store_of_visit: HashMap<String, String> = HashMap::new();
        let mut bought: HashMap<String, HashSet<String>> = HashMap::new();
        for visit in &visits {
            store_of_visit.insert(visit.visit_id.clone(), visit.store_code.clone());
            bought.entry(visit.store_code.clone()).or_default();
        }

        let visit_ids: Vec<String> = visits.iter().map(|v| v.visit_id.clone()).collect();
        for order in self.visits.orders_for_visits(&visit_ids).await? {
            if let Some(store_code) = store_of_visit.get(&order.visit_id) {
                bought
                    .entry(store_code.clone())
                    .or_default()
                    .insert(order.sku_code);
            }
        }

        let mut facts: Vec<StoreVisitFacts> = bought
            .into_iter()
            .map(|(store_code, bought_skus)| StoreVisitFacts {
                store_category: categories.get(&store_code).cloned().unwrap_or_default(),
                store_code,
                bought_skus,
            })
            .collect();
        facts.sort_by(|a, b| a.store_code.cmp(&b.store_code));

        Ok(compute_achievement(&index, &facts))
    }
}
