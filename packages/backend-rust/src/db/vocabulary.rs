use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use wortkarten_algo::level::filter_by_base;
use wortkarten_algo::{parse_entries, sort_levels, RawVocabularyEntry, VocabularyEntry};

use crate::db::CatalogError;

/// Row to insert; text columns may be absent just like in the table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabularyRow {
    #[serde(default)]
    pub id: Option<i64>,
    pub level: String,
    #[serde(default)]
    pub german: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One page of a level, ordered by id
///
/// Every row goes through the engine's strict parser: a single malformed row
/// fails the whole page.
pub async fn fetch_page(
    pool: &SqlitePool,
    level: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<VocabularyEntry>, CatalogError> {
    let rows = sqlx::query(
        r#"
        SELECT CAST("id" AS TEXT) AS "id",
               CAST("german" AS TEXT) AS "german",
               CAST("english" AS TEXT) AS "english",
               CAST("example" AS TEXT) AS "example",
               CAST("category" AS TEXT) AS "category",
               "level"
        FROM "vocabulary"
        WHERE "level" = ?
        ORDER BY "id"
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(level)
    .bind(i64::from(limit))
    .bind(i64::from(offset))
    .fetch_all(pool)
    .await?;

    let raw = rows
        .iter()
        .map(raw_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let entries = parse_entries(&raw)?;
    tracing::debug!(level = %level, count = entries.len(), offset, "fetched vocabulary page");
    Ok(entries)
}

/// Distinct level names, optionally restricted to a base-level prefix
pub async fn list_levels(
    pool: &SqlitePool,
    base_level: Option<&str>,
) -> Result<Vec<String>, CatalogError> {
    let base_level = base_level.map(str::trim).filter(|b| !b.is_empty());

    let mut levels: Vec<String> = match base_level {
        Some(base) => {
            sqlx::query_scalar(
                r#"SELECT DISTINCT "level" FROM "vocabulary" WHERE substr("level", 1, length(?1)) = ?1"#,
            )
            .bind(base)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_scalar(r#"SELECT DISTINCT "level" FROM "vocabulary""#)
                .fetch_all(pool)
                .await?
        }
    };

    if let Some(base) = base_level {
        levels = filter_by_base(levels, base);
    }
    sort_levels(&mut levels);
    Ok(levels)
}

pub async fn count(pool: &SqlitePool) -> Result<i64, CatalogError> {
    let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "vocabulary""#)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Insert rows in one transaction; returns the number written
pub async fn insert_rows(pool: &SqlitePool, rows: &[NewVocabularyRow]) -> Result<u64, CatalogError> {
    let mut tx = pool.begin().await?;
    let mut written = 0;

    for row in rows {
        let result = sqlx::query(
            r#"
            INSERT INTO "vocabulary" ("id", "level", "german", "english", "example", "category")
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.id)
        .bind(&row.level)
        .bind(row.german.as_deref())
        .bind(row.english.as_deref())
        .bind(row.example.as_deref())
        .bind(row.category.as_deref())
        .execute(&mut *tx)
        .await?;
        written += result.rows_affected();
    }

    tx.commit().await?;
    Ok(written)
}

fn raw_entry(row: &SqliteRow) -> Result<RawVocabularyEntry, CatalogError> {
    let text = |column: &str| -> Result<Option<String>, CatalogError> {
        row.try_get::<Option<String>, _>(column)
            .map_err(|e| CatalogError::MalformedRow(format!("{column}: {e}")))
    };

    Ok(RawVocabularyEntry {
        id: text("id")?,
        german: text("german")?,
        english: text("english")?,
        example: text("example")?,
        category: text("category")?,
        level: text("level")?,
    })
}
