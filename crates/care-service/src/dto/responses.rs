//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output, with camelCase
//! field names.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use care_core::entities::{AppointmentStatus, Gender, PaymentStatus, UserRole, UserStatus};

// ============================================================================
// User Responses
// ============================================================================

/// User account as returned by the API. The password hash never leaves the
/// repository layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub needs_password_change: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
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

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Doctor Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub contact_number: String,
    pub address: Option<String>,
    pub registration_number: String,
    pub experience: i32,
    pub gender: Gender,
    pub appointment_fee: i32,
    pub qualification: String,
    pub current_working_place: String,
    pub designation: String,
    pub average_rating: f64,
    pub is_deleted: bool,
    pub specialties: Vec<SpecialtyResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyResponse {
    pub id: Uuid,
    pub title: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Schedule Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorScheduleResponse {
    pub doctor_id: Uuid,
    pub schedule_id: Uuid,
    pub is_booked: bool,
    pub appointment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Appointment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub schedule_id: Uuid,
    pub video_calling_id: String,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub amount: i32,
    pub transaction_id: String,
    pub status: PaymentStatus,
}

/// A freshly booked appointment together with its pending payment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(flatten)]
    pub appointment: AppointmentResponse,
    pub payment: PaymentResponse,
}

// ============================================================================
// Webhook Responses
// ============================================================================

/// Outcome of one webhook delivery. Unhandled event types report
/// `success: false` without being an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<Uuid>,
    /// Raw `payment_status` reported by the checkout session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
}

impl WebhookResult {
    pub fn unhandled(event_type: &str) -> Self {
        Self {
            success: false,
            message: format!("Unhandled event type: {event_type}"),
            appointment_id: None,
            payment_id: None,
            payment_status: None,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "not_ready" },
            checks: HealthChecks { database },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhandled_webhook_serialization() {
        let json = serde_json::to_value(WebhookResult::unhandled("invoice.paid")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Unhandled event type: invoice.paid");
        assert!(json.get("appointmentId").is_none());
    }

    #[test]
    fn test_enum_fields_serialize_upper_case() {
        let now = Utc::now();
        let response = AppointmentResponse {
            id: Uuid::nil(),
            patient_id: Uuid::nil(),
            doctor_id: Uuid::nil(),
            schedule_id: Uuid::nil(),
            video_calling_id: "room".to_string(),
            status: AppointmentStatus::Scheduled,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["status"], "SCHEDULED");
        assert_eq!(json["paymentStatus"], "UNPAID");
        assert_eq!(json["videoCallingId"], "room");
    }
}
