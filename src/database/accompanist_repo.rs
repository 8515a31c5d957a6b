use sqlx::{SqliteConnection, SqlitePool};

use crate::models::AccompanistRow;

const SQL_LIST_ACTIVE_ACCOMPANISTS: &str = r#"
SELECT
  accompanist_id,
  student_id,
  name,
  email,
  phone,
  accompanist_type,
  is_team_manager,
  photo_url,
  id_card_url
FROM accompanists
WHERE college_id = ?
  AND is_deleted = 0
ORDER BY accompanist_id ASC
"#;

pub async fn list_active(
    conn: &mut SqliteConnection,
    college_id: &str,
) -> sqlx::Result<Vec<AccompanistRow>> {
    sqlx::query_as::<_, AccompanistRow>(SQL_LIST_ACTIVE_ACCOMPANISTS)
        .bind(college_id)
        .fetch_all(&mut *conn)
        .await
}

const SQL_LOAD_ACCOMPANIST: &str = r#"
SELECT
  accompanist_id,
  student_id,
  name,
  email,
  phone,
  accompanist_type,
  is_team_manager,
  photo_url,
  id_card_url
FROM accompanists
WHERE college_id = ?
  AND accompanist_id = ?
  AND is_deleted = 0
"#;

pub async fn load_active(
    pool: &SqlitePool,
    college_id: &str,
    accompanist_id: &str,
) -> sqlx::Result<Option<AccompanistRow>> {
    sqlx::query_as::<_, AccompanistRow>(SQL_LOAD_ACCOMPANIST)
        .bind(college_id)
        .bind(accompanist_id)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_ACCOMPANIST: &str = r#"
INSERT INTO accompanists (
  accompanist_id,
  college_id,
  student_id,
  name,
  email,
  phone,
  accompanist_type,
  is_team_manager,
  photo_url,
  id_card_url
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewAccompanist<'a> {
    pub accompanist_id: &'a str,
    pub college_id: &'a str,
    pub student_id: Option<&'a str>,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub accompanist_type: Option<&'a str>,
    pub is_team_manager: bool,
    pub photo_url: Option<&'a str>,
    pub id_card_url: Option<&'a str>,
}

pub async fn insert_accompanist(
    pool: &SqlitePool,
    accompanist: NewAccompanist<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_ACCOMPANIST)
        .bind(accompanist.accompanist_id)
        .bind(accompanist.college_id)
        .bind(accompanist.student_id)
        .bind(accompanist.name)
        .bind(accompanist.email)
        .bind(accompanist.phone)
        .bind(accompanist.accompanist_type)
        .bind(accompanist.is_team_manager as i64)
        .bind(accompanist.photo_url)
        .bind(accompanist.id_card_url)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_SOFT_DELETE_ACCOMPANIST: &str = r#"
UPDATE accompanists
SET is_deleted = 1
WHERE college_id = ?
  AND accompanist_id = ?
  AND is_deleted = 0
  AND is_team_manager = 0
"#;

// Team managers are excluded here on purpose, they are removed through the
// manager profile flow only.
pub async fn soft_delete(
    pool: &SqlitePool,
    college_id: &str,
    accompanist_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SOFT_DELETE_ACCOMPANIST)
        .bind(college_id)
        .bind(accompanist_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
