//! Doctor database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for doctors table
#[derive(Debug, Clone, FromRow)]
pub struct DoctorModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: String,
    pub address: Option<String>,
    pub registration_number: String,
    pub experience: i32,
    pub gender: String,
    pub appointment_fee: i32,
    pub qualification: String,
    pub current_working_place: String,
    pub designation: String,
    pub average_rating: f64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A specialty row joined through doctor_specialties, tagged with its doctor
#[derive(Debug, Clone, FromRow)]
pub struct DoctorSpecialtyModel {
    pub doctor_id: Uuid,
    pub id: Uuid,
    pub title: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
