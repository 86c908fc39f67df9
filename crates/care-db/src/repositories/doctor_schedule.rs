//! PostgreSQL implementation of DoctorScheduleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::DoctorSchedule;
use care_core::error::DomainError;
use care_core::traits::{DoctorScheduleRepository, RepoResult};

use crate::models::DoctorScheduleModel;

use super::error::{map_constraint_violation, map_db_error};

const DOCTOR_SCHEDULE_COLUMNS: &str =
    "doctor_id, schedule_id, is_booked, appointment_id, created_at";

/// PostgreSQL implementation of DoctorScheduleRepository
#[derive(Clone)]
pub struct PgDoctorScheduleRepository {
    pool: PgPool,
}

impl PgDoctorScheduleRepository {
    /// Create a new PgDoctorScheduleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorScheduleRepository for PgDoctorScheduleRepository {
    #[instrument(skip(self))]
    async fn find(&self, doctor_id: Uuid, schedule_id: Uuid) -> RepoResult<Option<DoctorSchedule>> {
        let result = sqlx::query_as::<_, DoctorScheduleModel>(&format!(
            "SELECT {DOCTOR_SCHEDULE_COLUMNS} FROM doctor_schedules \
             WHERE doctor_id = $1 AND schedule_id = $2"
        ))
        .bind(doctor_id)
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DoctorSchedule::from))
    }

    #[instrument(skip(self, schedule_ids), fields(count = schedule_ids.len()))]
    async fn assign(&self, doctor_id: Uuid, schedule_ids: &[Uuid]) -> RepoResult<Vec<DoctorSchedule>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let doctor_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM doctors WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(doctor_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if !doctor_exists {
            return Err(DomainError::DoctorNotFound(doctor_id));
        }

        let insert = format!(
            r"
            INSERT INTO doctor_schedules (doctor_id, schedule_id, is_booked, created_at)
            VALUES ($1, $2, FALSE, NOW())
            RETURNING {DOCTOR_SCHEDULE_COLUMNS}
            "
        );

        let mut assigned = Vec::with_capacity(schedule_ids.len());
        for &schedule_id in schedule_ids {
            let row = sqlx::query_as::<_, DoctorScheduleModel>(&insert)
                .bind(doctor_id)
                .bind(schedule_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    map_constraint_violation(
                        e,
                        || DomainError::ScheduleAlreadyAssigned,
                        || DomainError::ScheduleNotFound(schedule_id),
                    )
                })?;
            assigned.push(DoctorSchedule::from(row));
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(doctor_id = %doctor_id, assigned = assigned.len(), "Schedules assigned");
        Ok(assigned)
    }
}
