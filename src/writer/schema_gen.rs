use crate::schema::{PrimaryKey, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let pk = match &schema.primary_key {
            PrimaryKey::Assigned(name) if *name == col.name => " PRIMARY KEY",
            PrimaryKey::Surrogate(name) if *name == col.name => " PRIMARY KEY AUTOINCREMENT",
            _ => "",
        };
        // INTEGER PRIMARY KEY is already NOT NULL as the rowid alias
        let null_constraint = if pk.is_empty() { " NOT NULL" } else { "" };
        let unique = if col.unique { " UNIQUE" } else { "" };

        columns.push(format!(
            "    {} {}{}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint,
            unique
        ));
    }

    if let PrimaryKey::Composite(keys) = &schema.primary_key {
        columns.push(format!("    PRIMARY KEY ({})", keys.join(", ")));
    }

    // Add foreign key constraints
    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key and lookup columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| fk.column)
        .chain(schema.indexes.iter().copied())
        .map(|column| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, column, schema.name, column
            )
        })
        .collect()
}
