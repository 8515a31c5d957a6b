use sqlx::{SqliteConnection, SqlitePool};

use crate::models::CollegeRow;

const SQL_LOAD_COLLEGE: &str = r#"
SELECT
  college_id,
  code,
  name,
  max_participants,
  is_final_approved,
  final_approved_at,
  final_approved_by
FROM colleges
WHERE college_id = ?
"#;

// Read inside the exclusive approval transaction. BEGIN IMMEDIATE already
// holds the database write lock, so this is the "select for update" read.
pub async fn load_for_approval(
    conn: &mut SqliteConnection,
    college_id: &str,
) -> sqlx::Result<Option<CollegeRow>> {
    sqlx::query_as::<_, CollegeRow>(SQL_LOAD_COLLEGE)
        .bind(college_id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn load_college(
    pool: &SqlitePool,
    college_id: &str,
) -> sqlx::Result<Option<CollegeRow>> {
    sqlx::query_as::<_, CollegeRow>(SQL_LOAD_COLLEGE)
        .bind(college_id)
        .fetch_optional(pool)
        .await
}

const SQL_SET_FINAL_APPROVED: &str = r#"
UPDATE colleges
SET is_final_approved = 1,
    final_approved_at = datetime('now'),
    final_approved_by = ?
WHERE college_id = ?
  AND is_final_approved = 0
"#;

// The terminal write of the approval transaction. The is_final_approved = 0
// guard keeps the false -> true transition one-shot.
pub async fn set_final_approved(
    conn: &mut SqliteConnection,
    college_id: &str,
    approver_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SET_FINAL_APPROVED)
        .bind(approver_id)
        .bind(college_id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_IS_FINAL_APPROVED: &str = r#"
SELECT is_final_approved
FROM colleges
WHERE college_id = ?
"#;

// Roster-lock read used by every mutation endpoint outside the approval flow.
pub async fn is_final_approved(
    pool: &SqlitePool,
    college_id: &str,
) -> sqlx::Result<Option<bool>> {
    let flag: Option<i64> = sqlx::query_scalar(SQL_IS_FINAL_APPROVED)
        .bind(college_id)
        .fetch_optional(pool)
        .await?;
    Ok(flag.map(|v| v != 0))
}
