//! PostgreSQL implementation of PatientRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::{Patient, UserStatus};
use care_core::error::DomainError;
use care_core::query::{PageRequest, Predicate};
use care_core::traits::{PatientRepository, RepoResult};

use crate::filter::{select_count, select_page};
use crate::models::PatientModel;

use super::error::map_db_error;
use super::links::set_user_status;

const PATIENT_COLUMNS: &str = "id, name, email, profile_photo, contact_number, address, \
     is_deleted, created_at, updated_at";

/// PostgreSQL implementation of PatientRepository
#[derive(Clone)]
pub struct PgPatientRepository {
    pool: PgPool,
}

impl PgPatientRepository {
    /// Create a new PgPatientRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for PgPatientRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Patient>> {
        let result = sqlx::query_as::<_, PatientModel>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Patient::from))
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Patient>> {
        let rows = select_page(PATIENT_COLUMNS, "patients", predicate, page)
            .build_query_as::<PatientModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Patient::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        select_count("patients", predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid) -> RepoResult<Patient> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let patient = sqlx::query_as::<_, PatientModel>(&format!(
            r"
            UPDATE patients
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {PATIENT_COLUMNS}
            "
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(Patient::from)
        .ok_or(DomainError::PatientNotFound(id))?;

        set_user_status(&mut tx, &patient.email, UserStatus::Deleted).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(patient_id = %id, "Patient soft deleted");
        Ok(patient)
    }
}
