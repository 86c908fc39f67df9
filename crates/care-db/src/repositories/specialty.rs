//! PostgreSQL implementation of SpecialtyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::Specialty;
use care_core::error::DomainError;
use care_core::query::{PageRequest, Predicate};
use care_core::traits::{RepoResult, SpecialtyRepository};

use crate::filter::{select_count, select_page};
use crate::models::SpecialtyModel;

use super::error::{map_db_error, map_unique_violation};

const SPECIALTY_COLUMNS: &str = "id, title, icon, created_at, updated_at";

/// PostgreSQL implementation of SpecialtyRepository
#[derive(Clone)]
pub struct PgSpecialtyRepository {
    pool: PgPool,
}

impl PgSpecialtyRepository {
    /// Create a new PgSpecialtyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpecialtyRepository for PgSpecialtyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Specialty>> {
        let result = sqlx::query_as::<_, SpecialtyModel>(&format!(
            "SELECT {SPECIALTY_COLUMNS} FROM specialties WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Specialty::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, specialty: &Specialty) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO specialties (id, title, icon, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(specialty.id)
        .bind(&specialty.title)
        .bind(&specialty.icon)
        .bind(specialty.created_at)
        .bind(specialty.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SpecialtyAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Specialty>> {
        let rows = select_page(SPECIALTY_COLUMNS, "specialties", predicate, page)
            .build_query_as::<SpecialtyModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Specialty::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        select_count("specialties", predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM doctor_specialties WHERE specialty_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM specialties WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // dropping the transaction rolls back the link removal
            return Err(DomainError::SpecialtyNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(specialty_id = %id, "Specialty deleted");
        Ok(())
    }
}
