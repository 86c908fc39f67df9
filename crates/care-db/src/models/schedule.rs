//! Schedule database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ScheduleModel {
    pub id: Uuid,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DoctorScheduleModel {
    pub doctor_id: Uuid,
    pub schedule_id: Uuid,
    pub is_booked: bool,
    pub appointment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
