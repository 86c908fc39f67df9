//! PostgreSQL implementation of AppointmentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::{Appointment, Payment};
use care_core::error::DomainError;
use care_core::query::{PageRequest, Predicate};
use care_core::traits::{AppointmentRepository, RepoResult};

use crate::filter::{select_count, select_page};
use crate::models::AppointmentModel;

use super::error::{map_constraint_violation, map_db_error};

const APPOINTMENT_COLUMNS: &str = "id, patient_id, doctor_id, schedule_id, video_calling_id, \
     status, payment_status, created_at, updated_at";

/// PostgreSQL implementation of AppointmentRepository
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    /// Create a new PgAppointmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>> {
        let result = sqlx::query_as::<_, AppointmentModel>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Appointment::try_from).transpose()
    }

    #[instrument(skip(self, appointment, payment), fields(appointment_id = %appointment.id))]
    async fn create_with_payment(
        &self,
        appointment: &Appointment,
        payment: &Payment,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO appointments (id, patient_id, doctor_id, schedule_id, video_calling_id,
                                      status, payment_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(appointment.id)
        .bind(appointment.patient_id)
        .bind(appointment.doctor_id)
        .bind(appointment.schedule_id)
        .bind(&appointment.video_calling_id)
        .bind(appointment.status.as_str())
        .bind(appointment.payment_status.as_str())
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::ScheduleAlreadyBooked,
                || DomainError::ValidationError("Patient, doctor or schedule does not exist".into()),
            )
        })?;

        let booked = sqlx::query(
            r"
            UPDATE doctor_schedules
            SET is_booked = TRUE, appointment_id = $3
            WHERE doctor_id = $1 AND schedule_id = $2 AND is_booked = FALSE
            ",
        )
        .bind(appointment.doctor_id)
        .bind(appointment.schedule_id)
        .bind(appointment.id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if booked.rows_affected() == 0 {
            let assigned = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM doctor_schedules WHERE doctor_id = $1 AND schedule_id = $2)",
            )
            .bind(appointment.doctor_id)
            .bind(appointment.schedule_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

            return Err(if assigned {
                DomainError::ScheduleAlreadyBooked
            } else {
                DomainError::DoctorScheduleNotFound
            });
        }

        sqlx::query(
            r"
            INSERT INTO payments (id, appointment_id, amount, transaction_id, status,
                                  payment_gateway_data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(payment.id)
        .bind(payment.appointment_id)
        .bind(payment.amount)
        .bind(&payment.transaction_id)
        .bind(payment.status.as_str())
        .bind(&payment.payment_gateway_data)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            doctor_id = %appointment.doctor_id,
            schedule_id = %appointment.schedule_id,
            payment_id = %payment.id,
            "Appointment booked"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Appointment>> {
        let rows = select_page(APPOINTMENT_COLUMNS, "appointments", predicate, page)
            .build_query_as::<AppointmentModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        select_count("appointments", predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
