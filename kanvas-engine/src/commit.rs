//! Commit strategies for reconciled uploads
//!
//! Two write modes, matching the two lifecycles in the data model:
//!
//! - **replace by group** (MSL): each category present in the upload has its
//!   item set atomically replaced; categories absent from the upload keep
//!   their old items. A failing category stops the categories after it.
//! - **upsert by key** (products, outlets): one write per row, UPDATE or
//!   INSERT according to its classification; a failing row is counted and
//!   skipped, never aborting the batch.

use crate::csv::{ActionRow, MslRow, OutletRow, ProductRow, RowAction};
use crate::events::{EngineEvent, EventBus};
use crate::store::{Collection, Filter, Patch, StoreResult};
use serde::Serialize;
use shared::models::{MslItem, Outlet, Product};
use std::collections::HashMap;

/// Counters returned by an upsert commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub added: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Summary of a replace-by-group commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Categories replaced, in upload order
    pub categories: Vec<String>,
    /// Total items inserted across all replaced categories
    pub inserted: usize,
}

/// Executes commits and publishes the corresponding engine events
#[derive(Clone)]
pub struct CommitEngine {
    bus: EventBus,
}

impl CommitEngine {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    /// REPLACE_BY_GROUP: replace every category present in `items`
    ///
    /// Categories are processed in order of first appearance. Replacement of
    /// one category is atomic (see [`Collection::replace_where`]); a failure
    /// aborts the remaining categories and propagates, so the caller can
    /// report which categories were already committed.
    pub async fn replace_msl(
        &self,
        col: &dyn Collection<MslItem>,
        items: Vec<MslItem>,
    ) -> StoreResult<ReplaceOutcome> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<MslItem>> = HashMap::new();
        for item in items {
            if !groups.contains_key(&item.category) {
                order.push(item.category.clone());
            }
            groups.entry(item.category.clone()).or_default().push(item);
        }

        let mut inserted = 0;
        for category in &order {
            let rows = groups.remove(category).unwrap_or_default();
            let count = rows.len();
            col.replace_where(&Filter::new().eq("category", category), rows)
                .await
                .inspect_err(|e| {
                    tracing::error!(%category, error = %e, "MSL category replacement failed");
                })?;
            tracing::info!(%category, items = count, "MSL category replaced");
            inserted += count;
        }

        // No categories in the upload means nothing changed; stay silent
        if !order.is_empty() {
            self.bus.publish(EngineEvent::MslReplaced {
                categories: order.clone(),
            });
        }

        Ok(ReplaceOutcome {
            categories: order,
            inserted,
        })
    }

    /// UPSERT_BY_KEY for the product catalog
    pub async fn upsert_products(
        &self,
        col: &dyn Collection<Product>,
        actions: Vec<ActionRow<ProductRow>>,
    ) -> CommitOutcome {
        let actions = actions
            .into_iter()
            .map(|a| a.map(ProductRow::into_inner))
            .collect();
        let outcome = upsert_by_key(col, actions, "sku_code", |p: &Product| p.sku_code.clone()).await;

        self.bus.publish(EngineEvent::CatalogUpserted {
            added: outcome.added,
            updated: outcome.updated,
            failed: outcome.failed,
        });
        outcome
    }

    /// UPSERT_BY_KEY for the outlet register
    pub async fn upsert_outlets(
        &self,
        col: &dyn Collection<Outlet>,
        actions: Vec<ActionRow<OutletRow>>,
    ) -> CommitOutcome {
        let actions = actions
            .into_iter()
            .map(|a| a.map(OutletRow::into_inner))
            .collect();
        let outcome =
            upsert_by_key(col, actions, "store_code", |o: &Outlet| o.store_code.clone()).await;

        self.bus.publish(EngineEvent::OutletsUpserted {
            added: outcome.added,
            updated: outcome.updated,
            failed: outcome.failed,
        });
        outcome
    }

    /// Convenience wrapper: unwrap parsed MSL rows into items for
    /// [`Self::replace_msl`]
    pub async fn replace_msl_rows(
        &self,
        col: &dyn Collection<MslItem>,
        rows: Vec<MslRow>,
    ) -> StoreResult<ReplaceOutcome> {
        self.replace_msl(col, rows.into_iter().map(MslRow::into_inner).collect())
            .await
    }
}

/// Sequential per-row upsert
///
/// Each row is one write; a failing write increments `failed` and the loop
/// continues. Earlier rows stay committed on later failures, matching the
/// source system's per-row accounting.
async fn upsert_by_key<T>(
    col: &dyn Collection<T>,
    actions: Vec<ActionRow<T>>,
    key_field: &str,
    key_of: impl Fn(&T) -> String,
) -> CommitOutcome
where
    T: Serialize + Send + Sync + 'static,
{
    let mut outcome = CommitOutcome::default();

    for action in actions {
        let key = key_of(&action.row);
        let write = match action.action {
            RowAction::Insert => col.insert(vec![action.row]).await.map(|_| RowAction::Insert),
            RowAction::Update => match Patch::from_model(&action.row) {
                Ok(patch) => col
                    .update(&Filter::new().eq(key_field, &key), patch)
                    .await
                    .map(|_| RowAction::Update),
                Err(e) => Err(e),
            },
        };

        match write {
            Ok(RowAction::Insert) => outcome.added += 1,
            Ok(RowAction::Update) => outcome.updated += 1,
            Err(e) => {
                tracing::warn!(line = action.line, key = key.as_str(), error = %e, "Row commit failed");
                outcome.failed += 1;
            }
        }
    }

    outcome
}
