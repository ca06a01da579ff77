//! Database migrations for ideabank

use rusqlite::Connection;

use crate::error::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations. Safe to call against an existing store: table
/// creation uses IF NOT EXISTS and applied versions are recorded in
/// `schema_version`.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Initial schema (v1)
///
/// `total_score` and `project_tier` are stored generated columns: the store
/// recomputes them in the same transaction as the triggering write and
/// rejects any attempt to set them directly. Tier thresholds: 1 at >= 16,
/// 2 at >= 11, 3 below.
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS idea_store (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_name TEXT NOT NULL CHECK (length(project_name) > 0),
            category TEXT NOT NULL CHECK (length(category) > 0),
            priority_level INTEGER NOT NULL DEFAULT 1
                CHECK (priority_level BETWEEN 1 AND 4),
            size_score INTEGER NOT NULL DEFAULT 1
                CHECK (size_score BETWEEN 1 AND 3),
            business_impact INTEGER NOT NULL DEFAULT 1
                CHECK (business_impact BETWEEN 1 AND 4),
            resource_type INTEGER NOT NULL DEFAULT 1
                CHECK (resource_type BETWEEN 1 AND 3),
            risk_level INTEGER NOT NULL DEFAULT 1
                CHECK (risk_level BETWEEN 1 AND 3),
            total_score INTEGER GENERATED ALWAYS AS (
                priority_level + size_score + business_impact
                + resource_type + risk_level
            ) STORED,
            project_tier INTEGER GENERATED ALWAYS AS (
                CASE
                    WHEN priority_level + size_score + business_impact
                         + resource_type + risk_level >= 16 THEN 1
                    WHEN priority_level + size_score + business_impact
                         + resource_type + risk_level >= 11 THEN 2
                    ELSE 3
                END
            ) STORED,
            project_phase TEXT NOT NULL DEFAULT 'Planning'
                CHECK (project_phase IN ('Planning', 'In Progress', 'On Hold', 'Completed')),
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_idea_store_category ON idea_store(category);
        CREATE INDEX IF NOT EXISTS idx_idea_store_phase ON idea_store(project_phase);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (1)",
        [],
    )?;

    Ok(())
}
