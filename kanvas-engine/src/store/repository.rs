//! Typed repositories over the generic collection interface
//!
//! Repositories take `Arc<dyn Collection<T>>`, so they work unchanged over
//! any store implementation; [`EngineStore`] wires them to the embedded
//! SurrealDB tables.

use super::surreal::SurrealCollection;
use super::{Collection, Filter, StoreError, StoreResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{MslItem, Outlet, Product, Visit, VisitOrder};
use std::collections::HashSet;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Table names of the engine's collections
pub mod tables {
    pub const MSL_ITEM: &str = "msl_item";
    pub const PRODUCT: &str = "product";
    pub const OUTLET: &str = "outlet";
    pub const VISIT: &str = "visit";
    pub const VISIT_ORDER: &str = "visit_order";
}

/// Factory binding the engine's collections to one SurrealDB instance
#[derive(Clone)]
pub struct EngineStore {
    db: Surreal<Db>,
}

impl EngineStore {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn msl_items(&self) -> Arc<dyn Collection<MslItem>> {
        Arc::new(SurrealCollection::new(self.db.clone(), tables::MSL_ITEM))
    }

    pub fn products(&self) -> Arc<dyn Collection<Product>> {
        Arc::new(SurrealCollection::new(self.db.clone(), tables::PRODUCT))
    }

    pub fn outlets(&self) -> Arc<dyn Collection<Outlet>> {
        Arc::new(SurrealCollection::new(self.db.clone(), tables::OUTLET))
    }

    pub fn visits(&self) -> Arc<dyn Collection<Visit>> {
        Arc::new(SurrealCollection::new(self.db.clone(), tables::VISIT))
    }

    pub fn visit_orders(&self) -> Arc<dyn Collection<VisitOrder>> {
        Arc::new(SurrealCollection::new(self.db.clone(), tables::VISIT_ORDER))
    }
}

// =============================================================================
// MSL
// =============================================================================

/// Read access to the Must Selling List
#[derive(Clone)]
pub struct MslRepository {
    col: Arc<dyn Collection<MslItem>>,
}

impl MslRepository {
    pub fn new(col: Arc<dyn Collection<MslItem>>) -> Self {
        Self { col }
    }

    /// All MSL items in display order (category, then ascending priority)
    pub async fn find_all(&self) -> StoreResult<Vec<MslItem>> {
        let mut items = self.col.select(&Filter::all()).await?;
        crate::achievement::sort_for_display(&mut items);
        Ok(items)
    }

    /// One category's list, ascending by priority
    pub async fn find_by_category(&self, category: &str) -> StoreResult<Vec<MslItem>> {
        let mut items = self
            .col
            .select(&Filter::new().eq("category", category))
            .await?;
        crate::achievement::sort_for_display(&mut items);
        Ok(items)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Read access to the product catalog
#[derive(Clone)]
pub struct CatalogRepository {
    col: Arc<dyn Collection<Product>>,
}

impl CatalogRepository {
    pub fn new(col: Arc<dyn Collection<Product>>) -> Self {
        Self { col }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Product>> {
        self.col.select(&Filter::all()).await
    }

    /// Snapshot of existing SKU codes for INSERT/UPDATE classification
    pub async fn existing_skus(&self) -> StoreResult<HashSet<String>> {
        let products = self.find_all().await?;
        Ok(products.into_iter().map(|p| p.sku_code).collect())
    }
}

// =============================================================================
// Outlets
// =============================================================================

/// Read access to the outlet register
#[derive(Clone)]
pub struct OutletRepository {
    col: Arc<dyn Collection<Outlet>>,
}

impl OutletRepository {
    pub fn new(col: Arc<dyn Collection<Outlet>>) -> Self {
        Self { col }
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Outlet>> {
        self.col.select(&Filter::all()).await
    }

    /// Snapshot of existing store codes for INSERT/UPDATE classification
    pub async fn existing_codes(&self) -> StoreResult<HashSet<String>> {
        let outlets = self.find_all().await?;
        Ok(outlets.into_iter().map(|o| o.store_code).collect())
    }
}

// =============================================================================
// Visits
// =============================================================================

/// Visit capture and period reads
#[derive(Clone)]
pub struct VisitRepository {
    visits: Arc<dyn Collection<Visit>>,
    orders: Arc<dyn Collection<VisitOrder>>,
}

impl VisitRepository {
    pub fn new(
        visits: Arc<dyn Collection<Visit>>,
        orders: Arc<dyn Collection<VisitOrder>>,
    ) -> Self {
        Self { visits, orders }
    }

    /// Record one visit with its order lines
    ///
    /// Visits are created once per submission and never edited afterwards.
    /// Lines are validated before anything is written.
    pub async fn record_visit(&self, visit: Visit, lines: Vec<VisitOrder>) -> StoreResult<()> {
        for line in &lines {
            if line.visit_id != visit.visit_id {
                return Err(StoreError::Validation(
                    "order line does not belong to this visit".into(),
                ));
            }
            if line.quantity == 0 {
                return Err(StoreError::Validation(format!(
                    "quantity must be positive for {}",
                    line.sku_code
                )));
            }
            if line.unit_price < Decimal::ZERO {
                return Err(StoreError::Validation(format!(
                    "unit price must be non-negative for {}",
                    line.sku_code
                )));
            }
            if line.discount_percentage < Decimal::ZERO
                || line.discount_percentage > Decimal::ONE_HUNDRED
            {
                return Err(StoreError::Validation(format!(
                    "discount must be between 0 and 100 for {}",
                    line.sku_code
                )));
            }
        }

        let mut visit = visit;
        visit.has_order = !lines.is_empty();

        self.visits.insert(vec![visit]).await?;
        if !lines.is_empty() {
            self.orders.insert(lines).await?;
        }
        Ok(())
    }

    /// Visits whose date falls within `[from, to]`
    pub async fn visits_between(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<Visit>> {
        self.visits
            .select(&Filter::new().gte("visit_date", from).lte("visit_date", to))
            .await
    }

    /// All order lines belonging to the given visits
    pub async fn orders_for_visits(&self, visit_ids: &[String]) -> StoreResult<Vec<VisitOrder>> {
        if visit_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.orders
            .select(&Filter::new().any_of("visit_id", visit_ids))
            .await
    }
}
