#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantRow {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university_id: Option<i64>,
    pub major: Option<String>,
    pub gender: Option<String>,
    pub year_of_study: Option<String>,
    pub experience_level: Option<String>,
    pub needs_parking: i64,
    pub dietary_restrictions: Option<String>,
    pub interests: Option<String>,
    pub marketing_source: Option<String>,
    pub accommodations: Option<String>,
    pub resume_url: Option<String>,
    pub status: String,
    pub checked_in: i64,
    pub registered_at: String,
}

/// Identity fields returned by bulk delete.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantIdentityRow {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Full participant row denormalized with the university name, for export.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantExportRow {
    #[sqlx(flatten)]
    pub participant: ParticipantRow,
    pub university_name: Option<String>,
}
