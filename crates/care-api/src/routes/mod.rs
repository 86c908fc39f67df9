//! Route definitions
//!
//! Resource routes are mounted under /api/v1. The webhook and health probes
//! live at the root.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    appointments, doctors, health, patients, schedules, specialties, users, webhook,
};
use crate::state::AppState;

/// Headroom above the upload limit for the multipart framing and `data` field
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes(max_upload_bytes))
        .route("/webhook", post(webhook::stripe_webhook))
        .route("/", get(health::root))
        .fallback(health::not_found)
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(user_routes().layer(DefaultBodyLimit::max(
            max_upload_bytes + FORM_OVERHEAD_BYTES,
        )))
        .merge(doctor_routes())
        .merge(patient_routes())
        .merge(specialty_routes().layer(DefaultBodyLimit::max(
            max_upload_bytes + FORM_OVERHEAD_BYTES,
        )))
        .merge(schedule_routes())
        .merge(appointment_routes())
}

/// User account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(users::list_users))
        .route("/user/create-patient", post(users::create_patient))
        .route("/user/create-doctor", post(users::create_doctor))
        .route("/user/create-admin", post(users::create_admin))
        .route("/user/:id/status", patch(users::update_status))
}

/// Doctor routes
fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/doctor", get(doctors::list_doctors))
        .route(
            "/doctor/:id",
            get(doctors::get_doctor)
                .patch(doctors::update_doctor)
                .delete(doctors::delete_doctor),
        )
}

/// Patient routes
fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/patient", get(patients::list_patients))
        .route(
            "/patient/:id",
            get(patients::get_patient).delete(patients::delete_patient),
        )
}

/// Specialty routes
fn specialty_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/specialties",
            get(specialties::list_specialties).post(specialties::create_specialty),
        )
        .route(
            "/specialties/:id",
            delete(specialties::delete_specialty),
        )
}

/// Schedule and doctor-schedule routes
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/schedule",
            get(schedules::list_schedules).post(schedules::create_schedules),
        )
        .route("/schedule/:id", delete(schedules::delete_schedule))
        .route("/doctor-schedule", post(schedules::assign_schedules))
}

/// Appointment routes
fn appointment_routes() -> Router<AppState> {
    Router::new().route(
        "/appointment",
        get(appointments::list_appointments).post(appointments::create_appointment),
    )
}
