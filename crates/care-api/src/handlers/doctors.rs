//! Doctor handlers

use axum::extract::State;
use care_service::dto::{DoctorResponse, UpdateDoctorRequest};
use care_service::DoctorService;

use crate::extractors::{IdPath, ListQuery, ValidatedJson};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// List doctors with filters, search and paging
///
/// GET /doctor
pub async fn list_doctors(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<ApiResponse<Vec<DoctorResponse>>> {
    let service = DoctorService::new(state.service_context());
    let page = service.list_doctors(&query.params, &query.options).await?;
    Ok(ApiResponse::page("Doctor fetched successfully!", page))
}

/// GET /doctor/{id}
pub async fn get_doctor(
    State(state): State<AppState>,
    IdPath(doctor_id): IdPath,
) -> ApiResult<ApiResponse<DoctorResponse>> {
    let service = DoctorService::new(state.service_context());
    let doctor = service.get_doctor(doctor_id).await?;
    Ok(ApiResponse::ok("Doctor retrieved successfully!", doctor))
}

/// Update scalar fields and reconcile specialty links
///
/// PATCH /doctor/{id}
pub async fn update_doctor(
    State(state): State<AppState>,
    IdPath(doctor_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateDoctorRequest>,
) -> ApiResult<ApiResponse<DoctorResponse>> {
    let service = DoctorService::new(state.service_context());
    let doctor = service.update_doctor(doctor_id, request).await?;
    Ok(ApiResponse::ok("Doctor updated successfully!", doctor))
}

/// Soft delete
///
/// DELETE /doctor/{id}
pub async fn delete_doctor(
    State(state): State<AppState>,
    IdPath(doctor_id): IdPath,
) -> ApiResult<ApiResponse<DoctorResponse>> {
    let service = DoctorService::new(state.service_context());
    let doctor = service.delete_doctor(doctor_id).await?;
    Ok(ApiResponse::ok("Doctor deleted successfully!", doctor))
}
