use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database configuration: {0}")]
    ConnectionConfigError(String),

    #[error("Database error: {0}")]
    ConnectionError(#[from] sqlx::Error),

    /// The store rejected a `CREATE TABLE` or `ALTER TABLE` issued while
    /// reconciling a table. The table is left as it was.
    #[error("Failed to evolve table '{table}': {source}")]
    SchemaEvolution {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid input: {0}")]
    Validation(#[from] CoreError),

    /// A write collided with a unique key owned by another record.
    #[error("{0}")]
    Conflict(String),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

impl DbError {
    /// True for failures an operator has to act on (as opposed to the store
    /// simply being unreachable or a record not existing).
    pub fn is_schema_failure(&self) -> bool {
        matches!(self, DbError::SchemaEvolution { .. })
    }
}
