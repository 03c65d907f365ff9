//! Database schema as reversible sqlx migrations (`migrations/*.{up,down}.sql`).
//!
//! Applied versions are tracked by sqlx in `_sqlx_migrations`.

use sqlx::SqlitePool;
use sqlx::migrate::{Migrate, Migrator};
use tracing::info;

use crate::error::AcervoError;

/// Embedded migrations, oldest first:
/// - `create_itens`: one named item per row
/// - `create_caixas`: one box per row, hero/nemesis counters default to 0
///
/// `AUTOINCREMENT` keeps ids from being reused after the newest row is deleted.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Versions of every embedded migration, ascending.
pub fn known_versions() -> Vec<i64> {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| m.version)
        .collect()
}

async fn applied_versions(pool: &SqlitePool) -> Result<Vec<i64>, AcervoError> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let mut versions: Vec<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();
    versions.sort_unstable();
    Ok(versions)
}

/// Apply every pending migration; returns the versions applied by this call.
pub async fn migrate_up(pool: &SqlitePool) -> Result<Vec<i64>, AcervoError> {
    let before = applied_versions(pool).await?;
    MIGRATOR.run(pool).await?;

    let applied: Vec<i64> = known_versions()
        .into_iter()
        .filter(|v| !before.contains(v))
        .collect();
    if !applied.is_empty() {
        info!(versions = ?applied, "migrations applied");
    }
    Ok(applied)
}

/// Revert applied migrations newest first. `steps = None` reverts all of them.
/// Returns the versions reverted by this call.
pub async fn migrate_down(
    pool: &SqlitePool,
    steps: Option<usize>,
) -> Result<Vec<i64>, AcervoError> {
    let applied = applied_versions(pool).await?;
    let steps = steps.unwrap_or(applied.len()).min(applied.len());
    if steps == 0 {
        return Ok(Vec::new());
    }

    // `undo` reverts everything newer than `target`.
    let keep = applied.len() - steps;
    let target = if keep == 0 { 0 } else { applied[keep - 1] };
    MIGRATOR.undo(pool, target).await?;

    let reverted: Vec<i64> = applied[keep..].iter().rev().copied().collect();
    info!(versions = ?reverted, "migrations reverted");
    Ok(reverted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_ordered_and_unique() {
        let versions = known_versions();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
        assert_eq!(versions.len(), 2);
    }

    #[test]
    fn every_migration_has_a_reverse_step() {
        for version in known_versions() {
            let down = MIGRATOR
                .iter()
                .find(|m| m.version == version && m.migration_type.is_down_migration())
                .unwrap_or_else(|| panic!("migration {version} has no down step"));
            assert!(down.sql.contains("DROP TABLE"), "{}", down.description);
        }
    }
}
