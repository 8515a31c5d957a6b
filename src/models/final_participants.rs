#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FinalParticipantRow {
    pub participant_id: String,
    pub college_id: String,
    pub person_type: String,
    pub student_id: Option<String>,
    pub accompanist_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<i64>,
    pub accompanist_type: Option<String>,
    pub is_team_manager: i64,
    pub photo_url: Option<String>,
    pub id_card_url: Option<String>,
    pub qr_code: String,
    pub approved_by: String,
    pub approved_at: String,
}
