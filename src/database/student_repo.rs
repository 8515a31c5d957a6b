use sqlx::SqliteConnection;

use crate::models::EligibleStudentRow;

const SQL_APPROVED_EVENT_STUDENTS_BASE: &str = r#"
SELECT
  s.student_id,
  s.name,
  s.email,
  s.phone,
  s.gender,
  s.course,
  s.year_of_study,
  s.photo_url,
  s.id_card_url
FROM students s
JOIN student_applications sa ON sa.application_id = (
  SELECT sa2.application_id
  FROM student_applications sa2
  WHERE sa2.student_id = s.student_id
  ORDER BY sa2.created_at DESC, sa2.application_id DESC
  LIMIT 1
)
WHERE s.college_id = ?
  AND s.is_deleted = 0
  AND sa.status = 'APPROVED'
"#;

// Eligibility policy of record: an APPROVED latest application alone is not
// enough, the student must also be assigned to at least one configured event
// category for this college. The category list comes from configuration, so
// the IN clause is built per call.
pub async fn list_approved_event_students(
    conn: &mut SqliteConnection,
    college_id: &str,
    categories: &[String],
) -> sqlx::Result<Vec<EligibleStudentRow>> {
    if categories.is_empty() {
        // No configured categories means nobody can be event-assigned.
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; categories.len()].join(", ");
    let sql = format!(
        r#"{SQL_APPROVED_EVENT_STUDENTS_BASE}
  AND EXISTS (
    SELECT 1 FROM event_assignments ea
    WHERE ea.college_id = s.college_id
      AND ea.student_id = s.student_id
      AND ea.category IN ({placeholders})
  )
ORDER BY s.student_id ASC"#
    );

    let mut query = sqlx::query_as::<_, EligibleStudentRow>(&sql).bind(college_id);
    for category in categories {
        query = query.bind(category);
    }
    query.fetch_all(&mut *conn).await
}
