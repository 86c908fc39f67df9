//! User handlers
//!
//! Account creation for each role plus admin-side listing and status changes.

use axum::extract::State;
use care_service::dto::{
    AdminResponse, CreateAdminRequest, CreateDoctorRequest, CreatePatientRequest, DoctorResponse,
    PatientResponse, UpdateUserStatusRequest, UserResponse,
};
use care_service::UserService;

use crate::extractors::{FormData, IdPath, ListQuery, ValidatedJson};
use crate::response::{ApiResponse, ApiResult, Created};
use crate::state::AppState;

/// Create a patient account
///
/// POST /user/create-patient
pub async fn create_patient(
    State(state): State<AppState>,
    form: FormData<CreatePatientRequest>,
) -> ApiResult<Created<ApiResponse<PatientResponse>>> {
    let service = UserService::new(state.service_context());
    let patient = service.create_patient(form.data, form.file).await?;
    Ok(Created(ApiResponse::ok("Patient created successfully", patient)))
}

/// Create a doctor account
///
/// POST /user/create-doctor
pub async fn create_doctor(
    State(state): State<AppState>,
    form: FormData<CreateDoctorRequest>,
) -> ApiResult<Created<ApiResponse<DoctorResponse>>> {
    let service = UserService::new(state.service_context());
    let doctor = service.create_doctor(form.data, form.file).await?;
    Ok(Created(ApiResponse::ok("Doctor created successfully", doctor)))
}

/// Create an admin account
///
/// POST /user/create-admin
pub async fn create_admin(
    State(state): State<AppState>,
    form: FormData<CreateAdminRequest>,
) -> ApiResult<Created<ApiResponse<AdminResponse>>> {
    let service = UserService::new(state.service_context());
    let admin = service.create_admin(form.data, form.file).await?;
    Ok(Created(ApiResponse::ok("Admin created successfully", admin)))
}

/// GET /user
pub async fn list_users(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<ApiResponse<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let page = service.list_users(&query.params, &query.options).await?;
    Ok(ApiResponse::page("Users fetched successfully!", page))
}

/// PATCH /user/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserStatusRequest>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.update_status(user_id, request).await?;
    Ok(ApiResponse::ok("User status updated successfully!", user))
}
