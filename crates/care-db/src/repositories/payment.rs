//! PostgreSQL implementation of PaymentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::{CheckoutSettlement, Payment};
use care_core::error::DomainError;
use care_core::traits::{PaymentRepository, RepoResult};

use crate::models::PaymentModel;

use super::error::map_db_error;

const PAYMENT_COLUMNS: &str = "id, appointment_id, amount, transaction_id, status, \
     payment_gateway_data, created_at, updated_at";

/// PostgreSQL implementation of PaymentRepository
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new PgPaymentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Payment>> {
        let result = sqlx::query_as::<_, PaymentModel>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Payment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_appointment(&self, appointment_id: Uuid) -> RepoResult<Option<Payment>> {
        let result = sqlx::query_as::<_, PaymentModel>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE appointment_id = $1"
        ))
        .bind(appointment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Payment::try_from).transpose()
    }

    #[instrument(skip(self, settlement), fields(
        appointment_id = ?settlement.appointment_id,
        payment_id = ?settlement.payment_id,
        status = %settlement.status,
    ))]
    async fn settle_checkout(&self, settlement: &CheckoutSettlement) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let status = settlement.status.as_str();

        // PAID is terminal: a late or replayed event never downgrades it
        if let Some(appointment_id) = settlement.appointment_id {
            let result = sqlx::query(
                r"
                UPDATE appointments
                SET payment_status = CASE WHEN payment_status = 'PAID' THEN payment_status ELSE $2 END,
                    updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(appointment_id)
            .bind(status)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(DomainError::AppointmentNotFound(appointment_id));
            }
        }

        if let Some(payment_id) = settlement.payment_id {
            let result = sqlx::query(
                r"
                UPDATE payments
                SET status = CASE WHEN status = 'PAID' THEN status ELSE $2 END,
                    payment_gateway_data = COALESCE($3, payment_gateway_data),
                    updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(payment_id)
            .bind(status)
            .bind(&settlement.gateway_data)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(DomainError::PaymentNotFound(payment_id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        info!("Checkout settled");
        Ok(())
    }
}
