//! Test fixtures and data generators
//!
//! Request bodies with unique emails and titles so tests can share a database.

use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use uuid::Uuid;

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", unique_suffix())
}

/// `data` for `create-patient`
pub fn patient_payload(email: &str) -> Value {
    json!({
        "password": "Patient123",
        "patient": {
            "name": "Test Patient",
            "email": email,
            "contactNumber": "01700000000",
            "address": "Dhaka"
        }
    })
}

/// `data` for `create-doctor`
pub fn doctor_payload(email: &str, specialties: &[&str]) -> Value {
    json!({
        "password": "Doctor123",
        "doctor": {
            "name": "Dr. Test",
            "email": email,
            "contactNumber": "01800000000",
            "registrationNumber": format!("REG-{}", unique_suffix()),
            "experience": 5,
            "gender": "FEMALE",
            "appointmentFee": 500,
            "qualification": "MBBS, FCPS",
            "currentWorkingPlace": "City Hospital",
            "designation": "Consultant",
            "specialties": specialties
        }
    })
}

pub fn specialty_payload() -> Value {
    json!({ "title": format!("Specialty {}", unique_suffix()) })
}

/// A day far enough ahead that concurrent runs are unlikely to share it
pub fn unique_future_day() -> NaiveDate {
    let offset = i64::from(Uuid::new_v4().as_bytes()[0]) * 97
        + i64::from(Uuid::new_v4().as_bytes()[1]);
    NaiveDate::from_ymd_opt(2040, 1, 1).unwrap_or_default() + Duration::days(offset)
}

/// One day of slots from 09:00 to 10:00, i.e. two 30-minute schedules
pub fn schedule_payload(day: NaiveDate) -> Value {
    json!({
        "startDate": day.to_string(),
        "endDate": day.to_string(),
        "startTime": "09:00:00",
        "endTime": "10:00:00"
    })
}

/// Stripe `checkout.session.completed` event
pub fn checkout_completed(appointment_id: &str, payment_id: &str, payment_status: &str) -> Value {
    json!({
        "id": format!("evt_{}", unique_suffix()),
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": format!("cs_{}", unique_suffix()),
                "payment_status": payment_status,
                "payment_intent": "pi_integration",
                "customer_email": "patient@example.com",
                "metadata": {
                    "appointmentId": appointment_id,
                    "paymentId": payment_id
                }
            }
        }
    })
}
