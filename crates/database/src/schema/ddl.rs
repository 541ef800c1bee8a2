//! SQL text for the reconciliation statements.
//!
//! Identifiers and defaults come from the compiled-in descriptors, never from
//! request data, so they are formatted directly into the statement.

use super::{ColumnDef, ColumnType, EntityDescriptor};

pub fn column_sql(column: &ColumnDef) -> String {
    if column.ty == ColumnType::Serial {
        return format!("{} SERIAL PRIMARY KEY", column.name);
    }
    let mut sql = format!("{} {}", column.name, column.ty);
    if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    if let Some(default) = column.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(default);
    }
    if let Some(target) = column.references {
        sql.push_str(" REFERENCES ");
        sql.push_str(target);
    }
    sql
}

pub fn create_table_sql(descriptor: &EntityDescriptor) -> String {
    let mut lines: Vec<String> = descriptor
        .current_columns()
        .into_iter()
        .map(|column| format!("    {}", column_sql(column)))
        .collect();
    if let Some(key) = descriptor.unique_key {
        lines.push(format!("    UNIQUE ({key})"));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        descriptor.table_name,
        lines.join(",\n")
    )
}

/// PostgreSQL has no column placement clause, so the new column lands at the
/// end of the table; `after` is kept for the operator log only.
pub fn add_column_sql(table: &str, column: &ColumnDef) -> String {
    format!("ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {}", column_sql(column))
}

pub const DESCRIBE_TABLE_SQL: &str = r#"
    SELECT column_name::TEXT
    FROM information_schema.columns
    WHERE table_schema = current_schema() AND table_name = $1
    ORDER BY ordinal_position
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::descriptors::{NEWS, PRODUCT_SPECIFICATIONS};

    #[test]
    fn create_table_uses_full_current_column_set() {
        let sql = create_table_sql(&NEWS);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS news ("));
        assert!(sql.contains("id SERIAL PRIMARY KEY"));
        assert!(sql.contains("title VARCHAR(255) NOT NULL"));
        assert!(sql.contains("publish_date DATE"));
        assert!(sql.contains("is_published BOOLEAN NOT NULL DEFAULT TRUE"));
        assert!(sql.contains("UNIQUE (slug)"));
    }

    #[test]
    fn foreign_keys_are_rendered() {
        let sql = create_table_sql(&PRODUCT_SPECIFICATIONS);
        assert!(sql.contains("product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE"));
    }

    #[test]
    fn add_column_is_guarded() {
        let column = ColumnDef::optional("summary", ColumnType::Text);
        assert_eq!(
            add_column_sql("news", &column),
            "ALTER TABLE news ADD COLUMN IF NOT EXISTS summary TEXT"
        );
    }
}
