/// Catalog schema, applied idempotently on every connect
///
/// Text columns stay nullable: rows come from hand-maintained word lists and
/// are validated when read, not when written.
pub const VOCABULARY_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "vocabulary" (
        "id" INTEGER PRIMARY KEY,
        "level" TEXT NOT NULL,
        "german" TEXT,
        "english" TEXT,
        "example" TEXT,
        "category" TEXT
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS "idx_vocabulary_level_id" ON "vocabulary" ("level", "id")"#,
];
