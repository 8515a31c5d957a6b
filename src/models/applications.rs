#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationRow {
    pub application_id: String,
    pub student_id: String,
    pub college_id: String,
    pub status: String,
}
