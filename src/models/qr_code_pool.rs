#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QrPoolEntryRow {
    pub pool_entry_id: String,
    pub code: String,
}
