#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EligibleStudentRow {
    pub student_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<i64>,
    pub photo_url: Option<String>,
    pub id_card_url: Option<String>,
}
