//! SurrealDB-backed collection
//!
//! Generic implementation of [`Collection`] over an embedded SurrealDB
//! instance. Table names are engine constants (see [`super::tables`]), so
//! they are formatted into the query text; all values go through binds.

use super::{Collection, Filter, Patch, StoreResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// One SurrealDB table exposed as a typed [`Collection`]
pub struct SurrealCollection<T> {
    db: Surreal<Db>,
    table: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SurrealCollection<T> {
    pub fn new(db: Surreal<Db>, table: &'static str) -> Self {
        Self {
            db,
            table,
            _marker: PhantomData,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }
}

impl<T> Clone for SurrealCollection<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            table: self.table,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Collection<T> for SurrealCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn select(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        let (clause, binds) = filter.to_where_clause();
        let sql = format!("SELECT * FROM {}{}", self.table, clause);
        let mut query = self.db.query(sql);
        for (name, value) in binds {
            query = query.bind((name, value));
        }
        let rows: Vec<T> = query.await?.take(0)?;
        Ok(rows)
    }

    async fn insert(&self, rows: Vec<T>) -> StoreResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        let count = rows.len();
        let sql = format!("INSERT INTO {} $rows", self.table);
        let response = self.db.query(sql).bind(("rows", rows)).await?;
        response.check()?;
        Ok(count)
    }

    async fn update(&self, filter: &Filter, patch: Patch) -> StoreResult<usize> {
        let (clause, binds) = filter.to_where_clause();
        let sql = format!("UPDATE {} MERGE $patch{}", self.table, clause);
        let mut query = self.db.query(sql).bind(("patch", patch.into_value()));
        for (name, value) in binds {
            query = query.bind((name, value));
        }
        let updated: Vec<serde::de::IgnoredAny> = query.await?.take(0)?;
        Ok(updated.len())
    }

    async fn delete(&self, filter: &Filter) -> StoreResult<usize> {
        let (clause, binds) = filter.to_where_clause();
        let sql = format!("DELETE {}{} RETURN BEFORE", self.table, clause);
        let mut query = self.db.query(sql);
        for (name, value) in binds {
            query = query.bind((name, value));
        }
        let deleted: Vec<serde::de::IgnoredAny> = query.await?.take(0)?;
        Ok(deleted.len())
    }

    /// Atomic replacement: delete and insert run inside one transaction, so
    /// a reader never observes the group empty and a failure rolls both
    /// steps back
    async fn replace_where(&self, filter: &Filter, rows: Vec<T>) -> StoreResult<usize> {
        let (clause, binds) = filter.to_where_clause();
        let count = rows.len();
        let sql = format!(
            "BEGIN TRANSACTION; DELETE {table}{clause}; INSERT INTO {table} $rows; COMMIT TRANSACTION;",
            table = self.table,
        );
        let mut query = self.db.query(sql).bind(("rows", rows));
        for (name, value) in binds {
            query = query.bind((name, value));
        }
        let response = query.await?;
        response.check()?;
        Ok(count)
    }
}
