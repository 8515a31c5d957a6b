use sqlx::{SqliteConnection, SqlitePool};

use crate::models::FinalParticipantRow;

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO final_event_participants (
  participant_id,
  college_id,
  person_type,
  student_id,
  accompanist_id,
  name,
  email,
  phone,
  gender,
  course,
  year_of_study,
  accompanist_type,
  is_team_manager,
  photo_url,
  id_card_url,
  qr_code,
  approved_by
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewFinalParticipant<'a> {
    pub participant_id: &'a str,
    pub college_id: &'a str,
    pub person_type: &'a str,
    pub student_id: Option<&'a str>,
    pub accompanist_id: Option<&'a str>,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub course: Option<&'a str>,
    pub year_of_study: Option<i64>,
    pub accompanist_type: Option<&'a str>,
    pub is_team_manager: bool,
    pub photo_url: Option<&'a str>,
    pub id_card_url: Option<&'a str>,
    pub qr_code: &'a str,
    pub approved_by: &'a str,
}

// Rows written here are the permanent event-day record, no other workflow
// updates or deletes them.
pub async fn insert_participant(
    conn: &mut SqliteConnection,
    participant: NewFinalParticipant<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(participant.participant_id)
        .bind(participant.college_id)
        .bind(participant.person_type)
        .bind(participant.student_id)
        .bind(participant.accompanist_id)
        .bind(participant.name)
        .bind(participant.email)
        .bind(participant.phone)
        .bind(participant.gender)
        .bind(participant.course)
        .bind(participant.year_of_study)
        .bind(participant.accompanist_type)
        .bind(participant.is_team_manager as i64)
        .bind(participant.photo_url)
        .bind(participant.id_card_url)
        .bind(participant.qr_code)
        .bind(participant.approved_by)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LIST_FOR_COLLEGE: &str = r#"
SELECT
  participant_id,
  college_id,
  person_type,
  student_id,
  accompanist_id,
  name,
  email,
  phone,
  gender,
  course,
  year_of_study,
  accompanist_type,
  is_team_manager,
  photo_url,
  id_card_url,
  qr_code,
  approved_by,
  approved_at
FROM final_event_participants
WHERE college_id = ?
ORDER BY person_type DESC, participant_id ASC
"#;

pub async fn list_for_college(
    pool: &SqlitePool,
    college_id: &str,
) -> sqlx::Result<Vec<FinalParticipantRow>> {
    sqlx::query_as::<_, FinalParticipantRow>(SQL_LIST_FOR_COLLEGE)
        .bind(college_id)
        .fetch_all(pool)
        .await
}

const SQL_COUNT_FOR_COLLEGE: &str = r#"
SELECT COUNT(*)
FROM final_event_participants
WHERE college_id = ?
"#;

pub async fn count_for_college(pool: &SqlitePool, college_id: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(SQL_COUNT_FOR_COLLEGE)
        .bind(college_id)
        .fetch_one(pool)
        .await
}
