//! Patient handlers

use axum::extract::State;
use care_service::dto::PatientResponse;
use care_service::PatientService;

use crate::extractors::{IdPath, ListQuery};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /patient
pub async fn list_patients(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<ApiResponse<Vec<PatientResponse>>> {
    let service = PatientService::new(state.service_context());
    let page = service.list_patients(&query.params, &query.options).await?;
    Ok(ApiResponse::page("Patients fetched successfully!", page))
}

/// GET /patient/{id}
pub async fn get_patient(
    State(state): State<AppState>,
    IdPath(patient_id): IdPath,
) -> ApiResult<ApiResponse<PatientResponse>> {
    let service = PatientService::new(state.service_context());
    let patient = service.get_patient(patient_id).await?;
    Ok(ApiResponse::ok("Patient retrieved successfully!", patient))
}

/// DELETE /patient/{id}
pub async fn delete_patient(
    State(state): State<AppState>,
    IdPath(patient_id): IdPath,
) -> ApiResult<ApiResponse<PatientResponse>> {
    let service = PatientService::new(state.service_context());
    let patient = service.delete_patient(patient_id).await?;
    Ok(ApiResponse::ok("Patient deleted successfully!", patient))
}
