//! Appointment handlers

use axum::extract::State;
use care_service::dto::{AppointmentResponse, BookingResponse, CreateAppointmentRequest};
use care_service::AppointmentService;

use crate::extractors::{ListQuery, ValidatedJson};
use crate::response::{ApiResponse, ApiResult, Created};
use crate::state::AppState;

/// Book a slot; the response carries the unpaid payment record
///
/// POST /appointment
pub async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAppointmentRequest>,
) -> ApiResult<Created<ApiResponse<BookingResponse>>> {
    let service = AppointmentService::new(state.service_context());
    let booking = service.create_appointment(request).await?;
    Ok(Created(ApiResponse::ok(
        "Appointment booked successfully!",
        booking,
    )))
}

/// GET /appointment
pub async fn list_appointments(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<ApiResponse<Vec<AppointmentResponse>>> {
    let service = AppointmentService::new(state.service_context());
    let page = service
        .list_appointments(&query.params, &query.options)
        .await?;
    Ok(ApiResponse::page("Appointments fetched successfully!", page))
}
