use sqlx::{SqliteConnection, SqlitePool};

use crate::models::QrPoolEntryRow;

const SQL_RESERVE_UNUSED: &str = r#"
SELECT
  pool_entry_id,
  code
FROM qr_code_pool
WHERE is_used = 0
ORDER BY pool_entry_id ASC
LIMIT ?
"#;

// Must run inside a BEGIN IMMEDIATE transaction: the write lock taken at
// BEGIN is what keeps two in-flight approvals from picking the same rows.
// Returns fewer than `limit` rows when the pool is short, the caller decides
// whether that is exhaustion.
pub async fn reserve_unused(
    conn: &mut SqliteConnection,
    limit: i64,
) -> sqlx::Result<Vec<QrPoolEntryRow>> {
    sqlx::query_as::<_, QrPoolEntryRow>(SQL_RESERVE_UNUSED)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await
}

const SQL_MARK_USED: &str = r#"
UPDATE qr_code_pool
SET is_used = 1,
    assigned_to_participant_id = ?
WHERE pool_entry_id = ?
  AND is_used = 0
"#;

// One-shot assignment: the is_used = 0 guard means a pool entry can never be
// handed to a second participant. Affects 0 rows if the entry was already
// taken, the caller must treat that as a fault.
pub async fn mark_used(
    conn: &mut SqliteConnection,
    pool_entry_id: &str,
    participant_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_MARK_USED)
        .bind(participant_id)
        .bind(pool_entry_id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_COUNT_UNUSED: &str = r#"
SELECT COUNT(*)
FROM qr_code_pool
WHERE is_used = 0
"#;

pub async fn count_unused(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar(SQL_COUNT_UNUSED)
        .fetch_one(&mut *conn)
        .await
}

const SQL_INSERT_POOL_ENTRY: &str = r#"
INSERT OR IGNORE INTO qr_code_pool (pool_entry_id, code)
VALUES (?, ?)
"#;

// Operator replenishment path (see bin/seed_qr_pool). Duplicate codes are
// skipped so reseeding with an overlapping batch is harmless.
pub async fn insert_entries(pool: &SqlitePool, entries: &[(String, String)]) -> sqlx::Result<u64> {
    let mut inserted = 0;
    for (pool_entry_id, code) in entries {
        let res = sqlx::query(SQL_INSERT_POOL_ENTRY)
            .bind(pool_entry_id)
            .bind(code)
            .execute(pool)
            .await?;
        inserted += res.rows_affected();
    }
    Ok(inserted)
}
