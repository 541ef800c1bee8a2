//! Declarative table definitions and the runtime reconciliation that keeps
//! the live tables in line with them.
//!
//! A table is described once, as it was first shipped, by an
//! [`EntityDescriptor`]. Every later change is an [`SchemaAddition`]: a new
//! nullable (or defaulted) column with the release version that introduced it
//! and the existing column it belongs after. Columns are never renamed or
//! dropped.

pub mod ddl;
pub mod descriptors;
pub mod engine;

#[cfg(test)]
pub(crate) mod memory;

pub use descriptors::{all_descriptors, schema_history};
pub use engine::{PendingColumn, Reconciliation, SchemaEngine, SchemaExecutor};

use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-increment integer primary key.
    Serial,
    Integer,
    Boolean,
    Text,
    Varchar(u16),
    Date,
    Timestamp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Serial => f.write_str("SERIAL"),
            ColumnType::Integer => f.write_str("INTEGER"),
            ColumnType::Boolean => f.write_str("BOOLEAN"),
            ColumnType::Text => f.write_str("TEXT"),
            ColumnType::Varchar(len) => write!(f, "VARCHAR({len})"),
            ColumnType::Date => f.write_str("DATE"),
            ColumnType::Timestamp => f.write_str("TIMESTAMPTZ"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    /// A SQL literal or expression, e.g. `TRUE`, `0` or `NOW()`.
    pub default: Option<&'static str>,
    /// A foreign key target, e.g. `products(id) ON DELETE CASCADE`.
    pub references: Option<&'static str>,
}

impl ColumnDef {
    pub const fn required(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            default: None,
            references: None,
        }
    }

    pub const fn optional(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: true,
            default: None,
            references: None,
        }
    }

    pub const fn default_to(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn references(mut self, target: &'static str) -> Self {
        self.references = Some(target);
        self
    }

    /// Whether the column can be appended to a table that already holds rows.
    pub fn is_additive(&self) -> bool {
        self.nullable || self.default.is_some()
    }
}

/// A column appended to an already-shipped table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaAddition {
    /// Release that introduced the column. Additions are applied in version order.
    pub version: u32,
    /// The existing column this one is placed after.
    pub after: &'static str,
    pub column: ColumnDef,
}

#[derive(Debug)]
pub struct EntityDescriptor {
    pub entity_name: &'static str,
    pub table_name: &'static str,
    /// The columns the table was first created with.
    pub columns: &'static [ColumnDef],
    pub unique_key: Option<&'static str>,
    pub additions: &'static [SchemaAddition],
}

impl EntityDescriptor {
    /// True when the table's shape changed across releases, so reads must
    /// reconcile it before querying.
    pub fn has_evolved(&self) -> bool {
        !self.additions.is_empty()
    }

    /// The full current column set: original columns followed by every
    /// addition in version order.
    pub fn current_columns(&self) -> Vec<&ColumnDef> {
        let mut additions: Vec<&SchemaAddition> = self.additions.iter().collect();
        additions.sort_by_key(|addition| addition.version);
        self.columns
            .iter()
            .chain(additions.into_iter().map(|addition| &addition.column))
            .collect()
    }

    /// Checks the rules every descriptor must follow to be evolvable.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for column in self.current_columns() {
            if !seen.insert(column.name) {
                return Err(format!("{}: column '{}' declared twice", self.table_name, column.name));
            }
        }
        if let Some(key) = self.unique_key {
            if !seen.contains(key) {
                return Err(format!("{}: unique key '{key}' is not a column", self.table_name));
            }
        }
        for addition in self.additions {
            if !addition.column.is_additive() {
                return Err(format!(
                    "{}: added column '{}' must be nullable or have a default",
                    self.table_name, addition.column.name
                ));
            }
            if !seen.contains(addition.after) {
                return Err(format!(
                    "{}: column '{}' is anchored after unknown column '{}'",
                    self.table_name, addition.column.name, addition.after
                ));
            }
        }
        Ok(())
    }
}
