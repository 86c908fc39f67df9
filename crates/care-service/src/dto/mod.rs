//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs
//! - Raw list-query parameters

pub mod mappers;
pub mod query;
pub mod requests;
pub mod responses;

pub use query::QueryParams;

// Re-export commonly used request types
pub use requests::{
    AdminInput, AssignSchedulesRequest, CreateAdminRequest, CreateAppointmentRequest,
    CreateDoctorRequest, CreatePatientRequest, CreateScheduleRequest, CreateSpecialtyRequest,
    DoctorInput, PatientInput, UpdateDoctorRequest, UpdateUserStatusRequest, WithProfilePhoto,
};

// Re-export commonly used response types
pub use responses::{
    AdminResponse, AppointmentResponse, BookingResponse, DoctorResponse, DoctorScheduleResponse,
    HealthChecks, HealthResponse, PatientResponse, PaymentResponse, ReadinessResponse,
    ScheduleResponse, SpecialtyResponse, UserResponse, WebhookResult,
};
