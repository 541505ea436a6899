#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkshopRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub capacity: Option<i64>,
    pub created_at: String,
}
