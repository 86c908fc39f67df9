//! PostgreSQL implementation of ScheduleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::Schedule;
use care_core::error::DomainError;
use care_core::query::{PageRequest, Predicate};
use care_core::traits::{RepoResult, ScheduleRepository};

use crate::filter::{select_count, select_page};
use crate::models::ScheduleModel;

use super::error::{map_db_error, map_foreign_key_violation};

const SCHEDULE_COLUMNS: &str = "id, start_date_time, end_date_time, created_at, updated_at";

/// PostgreSQL implementation of ScheduleRepository
#[derive(Clone)]
pub struct PgScheduleRepository {
    pool: PgPool,
}

impl PgScheduleRepository {
    /// Create a new PgScheduleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Schedule>> {
        let result = sqlx::query_as::<_, ScheduleModel>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Schedule::from))
    }

    #[instrument(skip(self, schedules), fields(requested = schedules.len()))]
    async fn create_many(&self, schedules: &[Schedule]) -> RepoResult<Vec<Schedule>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let insert = format!(
            r"
            INSERT INTO schedules (id, start_date_time, end_date_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (start_date_time, end_date_time) DO NOTHING
            RETURNING {SCHEDULE_COLUMNS}
            "
        );

        let mut created = Vec::with_capacity(schedules.len());
        for schedule in schedules {
            let row = sqlx::query_as::<_, ScheduleModel>(&insert)
                .bind(schedule.id)
                .bind(schedule.start_date_time)
                .bind(schedule.end_date_time)
                .bind(schedule.created_at)
                .bind(schedule.updated_at)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;

            // None: an identical slot already exists
            if let Some(row) = row {
                created.push(Schedule::from(row));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(created = created.len(), "Schedules created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Schedule>> {
        let rows = select_page(SCHEDULE_COLUMNS, "schedules", predicate, page)
            .build_query_as::<ScheduleModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        select_count("schedules", predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            // an appointment still references the slot
            .map_err(|e| map_foreign_key_violation(e, || DomainError::ScheduleAlreadyBooked))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ScheduleNotFound(id));
        }

        info!(schedule_id = %id, "Schedule deleted");
        Ok(())
    }
}
