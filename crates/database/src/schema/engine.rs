use super::ddl::{add_column_sql, create_table_sql, DESCRIBE_TABLE_SQL};
use super::{ColumnDef, EntityDescriptor};
use crate::error::DbError;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

/// SQLSTATE codes a concurrent reconciliation can produce when another
/// process wins the race: duplicate_table, duplicate_column, and the
/// `pg_type` unique violation raised by racing `CREATE TABLE IF NOT EXISTS`.
const DUPLICATE_OBJECT_CODES: [&str; 3] = ["42P07", "42701", "23505"];

/// The three statements reconciliation needs from a store.
///
/// These are only ever issued by [`SchemaEngine`]; ordinary reads and writes
/// go through the repository and never see the duplicate-object leniency
/// implemented here.
#[async_trait]
pub trait SchemaExecutor: Send + Sync {
    async fn create_table(&self, descriptor: &EntityDescriptor) -> Result<(), DbError>;

    /// Names of the columns the live table currently has.
    async fn live_columns(&self, table: &str) -> Result<Vec<String>, DbError>;

    async fn add_column(&self, table: &str, column: &ColumnDef, after: &str) -> Result<(), DbError>;
}

fn is_duplicate_object(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| DUPLICATE_OBJECT_CODES.contains(&code.as_ref())),
        _ => false,
    }
}

/// Statement errors raised by the store itself are schema failures; anything
/// else (pool timeout, refused connection) is plain connectivity.
fn ddl_error(table: &str, error: sqlx::Error) -> DbError {
    match error {
        sqlx::Error::Database(_) => DbError::SchemaEvolution {
            table: table.to_string(),
            source: error,
        },
        other => DbError::ConnectionError(other),
    }
}

#[async_trait]
impl SchemaExecutor for PgPool {
    async fn create_table(&self, descriptor: &EntityDescriptor) -> Result<(), DbError> {
        match sqlx::query(&create_table_sql(descriptor)).execute(self).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_object(&e) => {
                tracing::debug!(table = descriptor.table_name, "Table created concurrently by another process");
                Ok(())
            }
            Err(e) => Err(ddl_error(descriptor.table_name, e)),
        }
    }

    async fn live_columns(&self, table: &str) -> Result<Vec<String>, DbError> {
        let columns = sqlx::query_scalar::<_, String>(DESCRIBE_TABLE_SQL)
            .bind(table)
            .fetch_all(self)
            .await
            .map_err(|e| ddl_error(table, e))?;
        Ok(columns)
    }

    async fn add_column(&self, table: &str, column: &ColumnDef, _after: &str) -> Result<(), DbError> {
        match sqlx::query(&add_column_sql(table, column)).execute(self).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_object(&e) => {
                tracing::debug!(table, column = column.name, "Column added concurrently by another process");
                Ok(())
            }
            Err(e) => Err(ddl_error(table, e)),
        }
    }
}

/// A column the live table is missing, with the column it should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingColumn<'a> {
    pub column: &'a ColumnDef,
    pub after: &'a str,
}

/// Works out which declared columns are absent from the live table, in the
/// order they must be added.
///
/// Original columns are anchored after their predecessor in the declaration;
/// additions use their own anchor and are ordered by release version.
pub fn plan_additions<'a>(
    descriptor: &'a EntityDescriptor,
    live: &HashSet<String>,
) -> Vec<PendingColumn<'a>> {
    let mut pending = Vec::new();
    let mut previous = None;
    for column in descriptor.columns {
        if !live.contains(column.name) {
            pending.push(PendingColumn {
                column,
                after: previous.unwrap_or_default(),
            });
        }
        previous = Some(column.name);
    }

    let mut additions: Vec<_> = descriptor.additions.iter().collect();
    additions.sort_by_key(|addition| addition.version);
    pending.extend(
        additions
            .into_iter()
            .filter(|addition| !live.contains(addition.column.name))
            .map(|addition| PendingColumn {
                column: &addition.column,
                after: addition.after,
            }),
    );
    pending
}

/// What one reconciliation did to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub table: &'static str,
    pub added_columns: Vec<&'static str>,
}

/// Ensures tables exist and carry every declared column.
///
/// Each table is reconciled at most once per engine: the result is cached in
/// a per-table cell, concurrent callers for the same table wait on the one
/// reconciliation in flight, and later calls return the cached result without
/// issuing any statement. A failed reconciliation is not cached, so the next
/// call tries again.
pub struct SchemaEngine<E> {
    executor: E,
    ensured: Mutex<HashMap<&'static str, Arc<OnceCell<Reconciliation>>>>,
}

impl<E: SchemaExecutor> SchemaEngine<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            ensured: Mutex::new(HashMap::new()),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn cell_for(&self, table: &'static str) -> Arc<OnceCell<Reconciliation>> {
        let mut ensured = self.ensured.lock().unwrap_or_else(PoisonError::into_inner);
        ensured.entry(table).or_default().clone()
    }

    /// True once `table` has been reconciled successfully by this engine.
    pub fn is_ensured(&self, table: &str) -> bool {
        let ensured = self.ensured.lock().unwrap_or_else(PoisonError::into_inner);
        ensured.get(table).is_some_and(|cell| cell.initialized())
    }

    pub async fn ensure_table(&self, descriptor: &EntityDescriptor) -> Result<Reconciliation, DbError> {
        let cell = self.cell_for(descriptor.table_name);
        let reconciliation = cell.get_or_try_init(|| self.reconcile(descriptor)).await?;
        Ok(reconciliation.clone())
    }

    /// Reconciles every descriptor in order, continuing past failures.
    pub async fn ensure_all(
        &self,
        descriptors: &[&EntityDescriptor],
    ) -> Vec<(&'static str, Result<Reconciliation, DbError>)> {
        let mut results = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let result = self.ensure_table(descriptor).await;
            if let Err(e) = &result {
                tracing::error!(table = descriptor.table_name, error = %e, "Schema reconciliation failed");
            }
            results.push((descriptor.table_name, result));
        }
        results
    }

    async fn reconcile(&self, descriptor: &EntityDescriptor) -> Result<Reconciliation, DbError> {
        let table = descriptor.table_name;
        self.executor.create_table(descriptor).await?;

        let live: HashSet<String> = self.executor.live_columns(table).await?.into_iter().collect();
        let pending = plan_additions(descriptor, &live);

        let mut added_columns = Vec::with_capacity(pending.len());
        for PendingColumn { column, after } in pending {
            tracing::info!(table, column = column.name, after, "Adding missing column");
            self.executor.add_column(table, column, after).await?;
            added_columns.push(column.name);
        }

        if added_columns.is_empty() {
            tracing::debug!(table, "Table is up to date");
        } else {
            tracing::info!(table, added = added_columns.len(), "Table reconciled");
        }
        Ok(Reconciliation {
            table,
            added_columns,
        })
    }
}
