//! Schedule and doctor-schedule handlers

use axum::extract::State;
use care_service::dto::{
    AssignSchedulesRequest, CreateScheduleRequest, DoctorScheduleResponse, ScheduleResponse,
};
use care_service::{DoctorScheduleService, ScheduleService};

use crate::extractors::{IdPath, ListQuery, ValidatedJson};
use crate::response::{ApiResponse, ApiResult, Created};
use crate::state::AppState;

/// Generate 30-minute slots over a date range
///
/// POST /schedule
pub async fn create_schedules(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateScheduleRequest>,
) -> ApiResult<Created<ApiResponse<Vec<ScheduleResponse>>>> {
    let service = ScheduleService::new(state.service_context());
    let schedules = service.create_schedules(request).await?;
    Ok(Created(ApiResponse::ok(
        "Schedule created successfully!",
        schedules,
    )))
}

/// GET /schedule
pub async fn list_schedules(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<ApiResponse<Vec<ScheduleResponse>>> {
    let service = ScheduleService::new(state.service_context());
    let page = service.list_schedules(&query.params, &query.options).await?;
    Ok(ApiResponse::page("Schedule fetched successfully!", page))
}

/// DELETE /schedule/{id}
pub async fn delete_schedule(
    State(state): State<AppState>,
    IdPath(schedule_id): IdPath,
) -> ApiResult<ApiResponse<()>> {
    let service = ScheduleService::new(state.service_context());
    service.delete_schedule(schedule_id).await?;
    Ok(ApiResponse::message(true, "Schedule deleted successfully!"))
}

/// POST /doctor-schedule
pub async fn assign_schedules(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AssignSchedulesRequest>,
) -> ApiResult<Created<ApiResponse<Vec<DoctorScheduleResponse>>>> {
    let service = DoctorScheduleService::new(state.service_context());
    let links = service.assign_schedules(request).await?;
    Ok(Created(ApiResponse::ok(
        "Doctor schedule created successfully!",
        links,
    )))
}
