#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CollegeRow {
    pub college_id: String,
    pub code: String,
    pub name: String,
    pub max_participants: i64,
    pub is_final_approved: i64,
    pub final_approved_at: Option<String>,
    pub final_approved_by: Option<String>,
}
