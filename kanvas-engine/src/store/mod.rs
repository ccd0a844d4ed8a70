//! Data-store abstraction
//!
//! The engine talks to its backing store through [`Collection`], a generic
//! per-entity interface exposing the four verbs the hosted backend offered
//! (select / insert / update / delete) plus the bulk operations the commit
//! engine needs. Nothing in the engine depends on a concrete transport; the
//! embedded SurrealDB implementation lives in [`surreal`].

pub mod repository;
pub mod surreal;

pub use repository::{
    CatalogRepository, EngineStore, MslRepository, OutletRepository, VisitRepository, tables,
};
pub use surreal::SurrealCollection;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use shared::error::AppError;
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::not_found(msg),
            StoreError::Duplicate(msg) => AppError::already_exists(msg),
            StoreError::Database(msg) => AppError::database(msg),
            StoreError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// One condition of a [`Filter`]
#[derive(Debug, Clone)]
pub enum Cond {
    Eq(String, Value),
    Gte(String, Value),
    Lte(String, Value),
    AnyOf(String, Vec<Value>),
}

/// Conjunction of field conditions
///
/// An empty filter matches every record in the collection.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conds: Vec<Cond>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching the whole collection
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Serialize) -> Self {
        self.conds.push(Cond::Eq(field.to_string(), to_value(value)));
        self
    }

    pub fn gte(mut self, field: &str, value: impl Serialize) -> Self {
        self.conds.push(Cond::Gte(field.to_string(), to_value(value)));
        self
    }

    pub fn lte(mut self, field: &str, value: impl Serialize) -> Self {
        self.conds.push(Cond::Lte(field.to_string(), to_value(value)));
        self
    }

    pub fn any_of<V: Serialize>(mut self, field: &str, values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(to_value).collect();
        self.conds.push(Cond::AnyOf(field.to_string(), values));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conds.is_empty()
    }

    /// Render as a `WHERE` clause with numbered bind parameters
    ///
    /// Field names come from engine constants, never user input; only values
    /// are bound.
    pub fn to_where_clause(&self) -> (String, Vec<(String, Value)>) {
        if self.conds.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut parts = Vec::with_capacity(self.conds.len());
        let mut binds = Vec::with_capacity(self.conds.len());
        for (i, cond) in self.conds.iter().enumerate() {
            let param = format!("p{i}");
            let (field, op, value) = match cond {
                Cond::Eq(f, v) => (f, "=", v.clone()),
                Cond::Gte(f, v) => (f, ">=", v.clone()),
                Cond::Lte(f, v) => (f, "<=", v.clone()),
                Cond::AnyOf(f, vs) => (f, "IN", Value::Array(vs.clone())),
            };
            parts.push(format!("{field} {op} ${param}"));
            binds.push((param, value));
        }

        (format!(" WHERE {}", parts.join(" AND ")), binds)
    }
}

fn to_value(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Partial update payload for [`Collection::update`]
#[derive(Debug, Clone)]
pub struct Patch(Value);

impl Patch {
    /// Build a patch from any serializable model or partial struct
    pub fn from_model<T: Serialize>(model: &T) -> StoreResult<Self> {
        let value = serde_json::to_value(model)
            .map_err(|e| StoreError::Validation(format!("Unserializable patch: {e}")))?;
        Ok(Self(value))
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Generic async interface to one entity collection
///
/// `replace_where` has a default sequential implementation (delete, then
/// insert, two independent round-trips); stores with transactions override
/// it with an atomic version so a crash between the two steps cannot leave
/// the group empty.
#[async_trait]
pub trait Collection<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Fetch all records matching the filter
    async fn select(&self, filter: &Filter) -> StoreResult<Vec<T>>;

    /// Insert rows, returning the number inserted
    async fn insert(&self, rows: Vec<T>) -> StoreResult<usize>;

    /// Merge the patch into all records matching the filter, returning the
    /// number updated
    async fn update(&self, filter: &Filter, patch: Patch) -> StoreResult<usize>;

    /// Delete all records matching the filter, returning the number deleted
    async fn delete(&self, filter: &Filter) -> StoreResult<usize>;

    /// Replace all records matching the filter with `rows`
    async fn replace_where(&self, filter: &Filter, rows: Vec<T>) -> StoreResult<usize> {
        self.delete(filter).await?;
        self.insert(rows).await
    }
}
