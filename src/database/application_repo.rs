use sqlx::SqlitePool;

use crate::models::ApplicationRow;

const SQL_LOAD_APPLICATION: &str = r#"
SELECT
  sa.application_id,
  sa.student_id,
  s.college_id,
  sa.status
FROM student_applications sa
JOIN students s ON s.student_id = sa.student_id
WHERE sa.application_id = ?
"#;

pub async fn load_application(
    pool: &SqlitePool,
    application_id: &str,
) -> sqlx::Result<Option<ApplicationRow>> {
    sqlx::query_as::<_, ApplicationRow>(SQL_LOAD_APPLICATION)
        .bind(application_id)
        .fetch_optional(pool)
        .await
}

const SQL_REVIEW_APPLICATION: &str = r#"
UPDATE student_applications
SET status = ?,
    reviewed_by = ?,
    reviewed_at = datetime('now')
WHERE application_id = ?
"#;

pub async fn review_application(
    pool: &SqlitePool,
    application_id: &str,
    status: &str,
    reviewer_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_REVIEW_APPLICATION)
        .bind(status)
        .bind(reviewer_id)
        .bind(application_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
