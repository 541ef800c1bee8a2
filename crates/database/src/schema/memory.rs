//! In-memory `SchemaExecutor` used by the engine tests.

use super::{ColumnDef, EntityDescriptor, SchemaExecutor};
use crate::error::DbError;
use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A store-side statement error, as the driver would report it.
#[derive(Debug)]
pub struct FakeDatabaseError {
    kind: ErrorKind,
}

impl FakeDatabaseError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for FakeDatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)
    }
}

impl StdError for FakeDatabaseError {}

impl DatabaseError for FakeDatabaseError {
    fn message(&self) -> &str {
        "rejected by the store"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        match self.kind {
            ErrorKind::UniqueViolation => Some(Cow::Borrowed("23505")),
            _ => Some(Cow::Borrowed("42501")),
        }
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        match self.kind {
            ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
            ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
            ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
            ErrorKind::CheckViolation => ErrorKind::CheckViolation,
            _ => ErrorKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateTable(String),
    Describe(String),
    AddColumn(String, String),
}

#[derive(Default)]
struct Tables {
    columns: HashMap<String, Vec<String>>,
    rows: HashMap<String, Vec<HashMap<String, String>>>,
    statements: Vec<Statement>,
    deny_create: HashSet<String>,
    deny_alter: HashSet<String>,
}

/// A fake store that records every statement it receives.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

fn permission_denied(table: &str) -> DbError {
    DbError::SchemaEvolution {
        table: table.to_string(),
        source: sqlx::Error::Protocol(format!("permission denied for table {table}")),
    }
}

impl MemoryStore {
    pub fn statements(&self) -> Vec<Statement> {
        self.inner.lock().unwrap().statements.clone()
    }

    pub fn columns(&self, table: &str) -> Vec<String> {
        self.inner.lock().unwrap().columns.get(table).cloned().unwrap_or_default()
    }

    pub fn rows(&self, table: &str) -> Vec<HashMap<String, String>> {
        self.inner.lock().unwrap().rows.get(table).cloned().unwrap_or_default()
    }

    pub fn insert(&self, table: &str, values: &[(&str, &str)]) {
        let row = values.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.inner.lock().unwrap().rows.entry(table.to_string()).or_default().push(row);
    }

    pub fn deny_create(&self, table: &str) {
        self.inner.lock().unwrap().deny_create.insert(table.to_string());
    }

    pub fn deny_alter(&self, table: &str) {
        self.inner.lock().unwrap().deny_alter.insert(table.to_string());
    }

    pub fn allow_alter(&self, table: &str) {
        self.inner.lock().unwrap().deny_alter.remove(table);
    }
}

#[async_trait]
impl SchemaExecutor for MemoryStore {
    async fn create_table(&self, descriptor: &EntityDescriptor) -> Result<(), DbError> {
        let mut tables = self.inner.lock().unwrap();
        let table = descriptor.table_name.to_string();
        tables.statements.push(Statement::CreateTable(table.clone()));
        if tables.deny_create.contains(&table) {
            return Err(permission_denied(&table));
        }
        let columns = descriptor
            .current_columns()
            .iter()
            .map(|c| c.name.to_string())
            .collect();
        tables.columns.entry(table).or_insert(columns);
        Ok(())
    }

    async fn live_columns(&self, table: &str) -> Result<Vec<String>, DbError> {
        let mut tables = self.inner.lock().unwrap();
        tables.statements.push(Statement::Describe(table.to_string()));
        Ok(tables.columns.get(table).cloned().unwrap_or_default())
    }

    async fn add_column(&self, table: &str, column: &ColumnDef, _after: &str) -> Result<(), DbError> {
        let mut tables = self.inner.lock().unwrap();
        tables
            .statements
            .push(Statement::AddColumn(table.to_string(), column.name.to_string()));
        if tables.deny_alter.contains(table) {
            return Err(permission_denied(table));
        }
        let columns = tables.columns.entry(table.to_string()).or_default();
        if !columns.iter().any(|c| c == column.name) {
            columns.push(column.name.to_string());
        }
        if let Some(default) = column.default {
            for row in tables.rows.entry(table.to_string()).or_default() {
                row.entry(column.name.to_string()).or_insert_with(|| default.to_string());
            }
        }
        Ok(())
    }
}
