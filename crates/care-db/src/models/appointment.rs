//! Appointment and payment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AppointmentModel {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub schedule_id: Uuid,
    pub video_calling_id: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PaymentModel {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub amount: i32,
    pub transaction_id: String,
    pub status: String,
    pub payment_gateway_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
