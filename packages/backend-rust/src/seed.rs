use std::path::Path;

use crate::db::vocabulary::{count, insert_rows, NewVocabularyRow};
use crate::db::{Catalog, CatalogError};

/// Load a JSON array of vocabulary rows into an empty catalog
///
/// A catalog that already holds words is left untouched and `0` is returned.
pub async fn seed_if_empty(catalog: &Catalog, path: &Path) -> Result<u64, CatalogError> {
    let existing = count(catalog.pool()).await?;
    if existing > 0 {
        tracing::debug!(existing, "vocabulary catalog already populated, skipping seed");
        return Ok(0);
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::Seed(format!("{}: {e}", path.display())))?;
    let rows: Vec<NewVocabularyRow> = serde_json::from_str(&content)
        .map_err(|e| CatalogError::Seed(format!("{}: {e}", path.display())))?;

    let written = insert_rows(catalog.pool(), &rows).await?;
    tracing::info!(rows = written, path = %path.display(), "seeded vocabulary catalog");
    Ok(written)
}
