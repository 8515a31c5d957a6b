#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccompanistRow {
    pub accompanist_id: String,
    pub student_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub accompanist_type: Option<String>,
    pub is_team_manager: i64,
    pub photo_url: Option<String>,
    pub id_card_url: Option<String>,
}
