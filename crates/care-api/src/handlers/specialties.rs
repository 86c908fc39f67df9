//! Specialty handlers

use axum::extract::State;
use care_service::dto::{CreateSpecialtyRequest, SpecialtyResponse};
use care_service::SpecialtyService;

use crate::extractors::{FormData, IdPath, ListQuery};
use crate::response::{ApiResponse, ApiResult, Created};
use crate::state::AppState;

/// Create a specialty. The uploaded file, when present, becomes its icon.
///
/// POST /specialties
pub async fn create_specialty(
    State(state): State<AppState>,
    form: FormData<CreateSpecialtyRequest>,
) -> ApiResult<Created<ApiResponse<SpecialtyResponse>>> {
    let service = SpecialtyService::new(state.service_context());
    let specialty = service.create_specialty(form.data, form.file).await?;
    Ok(Created(ApiResponse::ok(
        "Specialty created successfully!",
        specialty,
    )))
}

/// GET /specialties
pub async fn list_specialties(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<ApiResponse<Vec<SpecialtyResponse>>> {
    let service = SpecialtyService::new(state.service_context());
    let page = service
        .list_specialties(&query.params, &query.options)
        .await?;
    Ok(ApiResponse::page("Specialties fetched successfully!", page))
}

/// DELETE /specialties/{id}
pub async fn delete_specialty(
    State(state): State<AppState>,
    IdPath(specialty_id): IdPath,
) -> ApiResult<ApiResponse<()>> {
    let service = SpecialtyService::new(state.service_context());
    service.delete_specialty(specialty_id).await?;
    Ok(ApiResponse::message(true, "Specialty deleted successfully!"))
}
