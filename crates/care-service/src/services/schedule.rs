//! Schedule service
//!
//! Generates fixed-length slots over a date range and lists them, optionally
//! hiding the slots a given doctor already holds.

use care_core::entities::Schedule;
use care_core::query::{
    build_predicate, schedules_free_for, Page, PageRequest, PaginationOptions, ScheduleFilter,
};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{CreateScheduleRequest, QueryParams, ScheduleResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Length of one bookable slot
pub const SLOT_MINUTES: i64 = 30;

/// Widest date range one request may generate slots for
pub const MAX_RANGE_DAYS: i64 = 366;

/// Query key naming the doctor whose assigned slots are hidden
pub const DOCTOR_ID_PARAM: &str = "doctorId";

/// Every slot `[start, end)` the request covers, day by day
pub fn schedule_slots(
    request: &CreateScheduleRequest,
) -> ServiceResult<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    if request.end_date < request.start_date {
        return Err(ServiceError::validation("endDate must not be before startDate"));
    }
    if request.end_time <= request.start_time {
        return Err(ServiceError::validation("endTime must be after startTime"));
    }
    if (request.end_date - request.start_date).num_days() >= MAX_RANGE_DAYS {
        return Err(ServiceError::validation(format!(
            "Date range must span fewer than {MAX_RANGE_DAYS} days"
        )));
    }

    let slot = Duration::minutes(SLOT_MINUTES);
    let mut slots = Vec::new();
    for day in request
        .start_date
        .iter_days()
        .take_while(|day| *day <= request.end_date)
    {
        let mut start = day.and_time(request.start_time).and_utc();
        let day_end = day.and_time(request.end_time).and_utc();
        while start + slot <= day_end {
            slots.push((start, start + slot));
            start += slot;
        }
    }
    Ok(slots)
}

pub struct ScheduleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScheduleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create the slots the request covers. Slots that already exist are
    /// skipped; only new ones are returned.
    #[instrument(skip(self))]
    pub async fn create_schedules(
        &self,
        request: CreateScheduleRequest,
    ) -> ServiceResult<Vec<ScheduleResponse>> {
        let schedules: Vec<Schedule> = schedule_slots(&request)?
            .into_iter()
            .map(|(start, end)| Schedule::new(start, end))
            .collect();

        let created = self.ctx.schedule_repo().create_many(&schedules).await?;
        info!(
            requested = schedules.len(),
            created = created.len(),
            "Schedules created"
        );

        Ok(created.iter().map(ScheduleResponse::from).collect())
    }

    /// List slots in a date range. With `doctorId`, slots already assigned to
    /// that doctor are left out.
    #[instrument(skip(self, params))]
    pub async fn list_schedules(
        &self,
        params: &QueryParams,
        options: &PaginationOptions,
    ) -> ServiceResult<Page<ScheduleResponse>> {
        let page = PageRequest::resolve::<Schedule>(options)?;

        let mut filters = params.filters::<ScheduleFilter>()?;
        if let Some(raw) = params.get(DOCTOR_ID_PARAM) {
            let doctor_id: Uuid = raw
                .parse()
                .map_err(|_| ServiceError::validation(format!("Invalid doctorId: {raw}")))?;
            filters = filters.with_relation(schedules_free_for(doctor_id));
        }
        let predicate = build_predicate::<Schedule>(filters);

        let repo = self.ctx.schedule_repo();
        let (schedules, total) =
            tokio::try_join!(repo.find_many(&predicate, &page), repo.count(&predicate))?;

        Ok(Page::new(schedules, total, &page).map(|s| ScheduleResponse::from(&s)))
    }

    /// Delete a slot. Booked slots cannot be deleted.
    #[instrument(skip(self))]
    pub async fn delete_schedule(&self, schedule_id: Uuid) -> ServiceResult<()> {
        self.ctx.schedule_repo().delete(schedule_id).await?;
        info!(schedule_id = %schedule_id, "Schedule deleted");
        Ok(())
    }
}
