//! Doctor schedule service: assigning slots to doctors

use std::collections::HashSet;

use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{AssignSchedulesRequest, DoctorScheduleResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct DoctorScheduleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DoctorScheduleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Link every requested slot to the doctor. Either all links are created
    /// or none are.
    #[instrument(skip(self, request), fields(doctor_id = %request.doctor_id))]
    pub async fn assign_schedules(
        &self,
        request: AssignSchedulesRequest,
    ) -> ServiceResult<Vec<DoctorScheduleResponse>> {
        request.validate()?;

        let mut seen = HashSet::new();
        let schedule_ids: Vec<_> = request
            .schedule_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let links = self
            .ctx
            .doctor_schedule_repo()
            .assign(request.doctor_id, &schedule_ids)
            .await?;

        info!(count = links.len(), "Schedules assigned");
        Ok(links.iter().map(DoctorScheduleResponse::from).collect())
    }
}
