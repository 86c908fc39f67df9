//! Patient and admin database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct PatientModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AdminModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
