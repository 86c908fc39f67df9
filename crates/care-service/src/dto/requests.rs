//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names follow the API's camelCase convention.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use care_core::entities::{DoctorPatch, Gender, SpecialtyDirective, UserStatus};

// ============================================================================
// User Requests
// ============================================================================

/// Patient profile fields sent with `create-patient`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub contact_number: Option<String>,

    pub address: Option<String>,

    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePatientRequest {
    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,

    #[validate(nested)]
    pub patient: PatientInput,
}

/// Doctor profile fields sent with `create-doctor`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DoctorInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub profile_photo: Option<String>,

    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_number: String,

    pub address: Option<String>,

    #[validate(length(min = 1, message = "Registration number is required"))]
    pub registration_number: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience: i32,

    pub gender: Gender,

    #[validate(range(min = 0, message = "Appointment fee cannot be negative"))]
    pub appointment_fee: i32,

    #[validate(length(min = 1, message = "Qualification is required"))]
    pub qualification: String,

    #[validate(length(min = 1, message = "Current working place is required"))]
    pub current_working_place: String,

    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,

    /// Specialties linked when the doctor is created
    #[serde(default)]
    pub specialties: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDoctorRequest {
    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,

    #[validate(nested)]
    pub doctor: DoctorInput,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_number: String,

    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,

    #[validate(nested)]
    pub admin: AdminInput,
}

/// Account status change
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserStatusRequest {
    pub status: UserStatus,
}

// ============================================================================
// Enriched payloads
// ============================================================================

/// Profile inputs that carry an optional photo URL
pub trait WithProfilePhoto: Sized {
    /// A copy of the payload whose photo is `url`, or the payload unchanged
    /// when nothing was uploaded
    #[must_use]
    fn with_profile_photo(self, url: Option<String>) -> Self;
}

macro_rules! impl_with_profile_photo {
    ($($ty:ty),*) => {$(
        impl WithProfilePhoto for $ty {
            fn with_profile_photo(self, url: Option<String>) -> Self {
                match url {
                    Some(url) => Self {
                        profile_photo: Some(url),
                        ..self
                    },
                    None => self,
                }
            }
        }
    )*};
}

impl_with_profile_photo!(PatientInput, DoctorInput, AdminInput);

// ============================================================================
// Doctor Requests
// ============================================================================

/// Partial doctor update. `specialties` carries link directives.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub profile_photo: Option<String>,

    #[validate(length(min = 1, message = "Contact number cannot be empty"))]
    pub contact_number: Option<String>,

    pub address: Option<String>,

    #[validate(length(min = 1, message = "Registration number cannot be empty"))]
    pub registration_number: Option<String>,

    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience: Option<i32>,

    pub gender: Option<Gender>,

    #[validate(range(min = 0, message = "Appointment fee cannot be negative"))]
    pub appointment_fee: Option<i32>,

    pub qualification: Option<String>,

    pub current_working_place: Option<String>,

    pub designation: Option<String>,

    #[serde(default)]
    pub specialties: Vec<SpecialtyDirective>,
}

impl UpdateDoctorRequest {
    /// Split into the scalar patch and the specialty directives
    pub fn into_parts(self) -> (DoctorPatch, Vec<SpecialtyDirective>) {
        let patch = DoctorPatch {
            name: self.name,
            profile_photo: self.profile_photo,
            contact_number: self.contact_number,
            address: self.address,
            registration_number: self.registration_number,
            experience: self.experience,
            gender: self.gender,
            appointment_fee: self.appointment_fee,
            qualification: self.qualification,
            current_working_place: self.current_working_place,
            designation: self.designation,
        };
        (patch, self.specialties)
    }
}

// ============================================================================
// Specialty Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSpecialtyRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    pub icon: Option<String>,
}

// ============================================================================
// Schedule Requests
// ============================================================================

/// Generate 30-minute slots for every day in `[startDate, endDate]`
/// between `startTime` and `endTime` (UTC)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignSchedulesRequest {
    pub doctor_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Provide 1-100 schedule ids"))]
    pub schedule_ids: Vec<Uuid>,
}

// ============================================================================
// Appointment Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub schedule_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn patient_request(email: &str, password: &str) -> CreatePatientRequest {
        serde_json::from_value(serde_json::json!({
            "password": password,
            "patient": {"name": "Pat", "email": email, "contactNumber": "0100"}
        }))
        .unwrap()
    }

    #[test]
    fn test_create_patient_validation() {
        assert!(patient_request("pat@example.com", "secret1").validate().is_ok());

        // Invalid - nested email
        assert!(patient_request("not-an-email", "secret1").validate().is_err());

        // Invalid - password too short
        assert!(patient_request("pat@example.com", "123").validate().is_err());
    }

    #[test]
    fn test_missing_profile_is_rejected_at_parse() {
        let result: Result<CreatePatientRequest, _> =
            serde_json::from_value(serde_json::json!({"password": "secret1"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_photo_enrichment() {
        let input = patient_request("pat@example.com", "secret1").patient;
        let untouched = input.clone().with_profile_photo(None);
        assert_eq!(untouched.profile_photo, None);

        let enriched = input.with_profile_photo(Some("http://files/a.png".to_string()));
        assert_eq!(enriched.profile_photo.as_deref(), Some("http://files/a.png"));
        assert_eq!(enriched.email, "pat@example.com");
    }

    #[test]
    fn test_update_doctor_into_parts() {
        let s1 = Uuid::new_v4();
        let request: UpdateDoctorRequest = serde_json::from_value(serde_json::json!({
            "name": "Dr. New",
            "appointmentFee": 500,
            "specialties": [{"specialtyId": s1, "isDeleted": true}]
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let (patch, directives) = request.into_parts();
        assert_eq!(patch.name.as_deref(), Some("Dr. New"));
        assert_eq!(patch.appointment_fee, Some(500));
        assert!(patch.designation.is_none());
        assert_eq!(directives.len(), 1);
        assert!(directives[0].is_deleted);
    }

    #[test]
    fn test_update_doctor_rejects_negative_fee() {
        let request = UpdateDoctorRequest {
            appointment_fee: Some(-1),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_schedule_request_parses_short_times() {
        let request: CreateScheduleRequest = serde_json::from_value(serde_json::json!({
            "startDate": "2025-01-01",
            "endDate": "2025-01-02",
            "startTime": "09:00",
            "endTime": "11:30"
        }))
        .unwrap();
        assert_eq!(request.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(request.end_time, NaiveTime::from_hms_opt(11, 30, 0).unwrap());
    }

    #[test]
    fn test_assign_requires_schedules() {
        let request = AssignSchedulesRequest {
            doctor_id: Uuid::new_v4(),
            schedule_ids: vec![],
        };
        assert!(request.validate().is_err());
    }
}
