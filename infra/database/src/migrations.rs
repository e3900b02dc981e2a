use crate::error::DatabaseError;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// A single versioned schema script. Scripts are applied in declaration
/// order and recorded in the `migration` table so reruns skip them.
#[derive(Debug)]
pub(crate) struct Migration {
    pub version: &'static str,
    pub name: &'static str,
    pub script: &'static str,
}

const TRACKING_SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS migration SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS version ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS name ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS applied_at ON migration TYPE datetime DEFAULT time::now();
";

/// Ordered list of schema migrations. Append new entries, never edit
/// applied ones.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001",
        name: "templates",
        script: "
            DEFINE TABLE IF NOT EXISTS template SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS template_identifier ON template FIELDS identifier UNIQUE;
        ",
    },
    Migration {
        version: "0002",
        name: "content",
        script: "
            DEFINE TABLE IF NOT EXISTS content_item SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS content_item_slug ON content_item FIELDS slug UNIQUE;
            DEFINE TABLE IF NOT EXISTS template_settings SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS template_settings_content ON template_settings FIELDS content_id UNIQUE;
            DEFINE TABLE IF NOT EXISTS media_item SCHEMALESS;
        ",
    },
    Migration {
        version: "0003",
        name: "legacy",
        script: "
            DEFINE TABLE IF NOT EXISTS legacy_mapping SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS legacy_mapping_pair ON legacy_mapping FIELDS legacy_article_id, content_id UNIQUE;
            DEFINE TABLE IF NOT EXISTS field_override SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS field_override_lookup ON field_override FIELDS mapping_id, field_name;
            DEFINE TABLE IF NOT EXISTS migration_job SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS migration_job_id ON migration_job FIELDS job_id UNIQUE;
        ",
    },
];

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

#[derive(Debug, SurrealValue)]
struct AppliedMigration {
    version: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        self.db.query(TRACKING_SCHEMA).await?.check().map_err(surrealdb::Error::from)?;

        let applied_versions = self.applied_versions().await?;

        let mut report = MigrationReport::default();
        for migration in MIGRATIONS {
            if applied_versions.iter().any(|v| v == migration.version) {
                report.skipped.push(migration.version);
                continue;
            }
            self.apply(migration).await?;
            report.applied.push(migration.version);
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE type::record('migration', $version) SET version = $version, name = $name;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("version", migration.version.to_owned()))
            .bind(("name", migration.name.to_owned()))
            .await?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(|e| DatabaseError::Migration {
                message: format!("Failed to apply {} ({}): {e}", migration.version, migration.name)
                    .into(),
            })?;

        Ok(())
    }

    async fn applied_versions(&self) -> Result<Vec<String>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT version FROM migration")
            .await?
            .take::<Vec<AppliedMigration>>(0)?;

        Ok(entries.into_iter().map(|entry| entry.version).collect())
    }
}
