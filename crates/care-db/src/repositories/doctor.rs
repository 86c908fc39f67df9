//! PostgreSQL implementation of DoctorRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::{Doctor, DoctorPatch, SpecialtyDirective, UserStatus};
use care_core::error::DomainError;
use care_core::query::{PageRequest, Predicate};
use care_core::traits::{DoctorRepository, RepoResult};

use crate::filter::{select_count, select_page};
use crate::models::DoctorModel;

use super::error::map_db_error;
use super::links::{
    hydrate_doctors, link_specialties, load_doctor, set_user_status, unlink_specialties,
    DOCTOR_COLUMNS,
};

/// PostgreSQL implementation of DoctorRepository
#[derive(Clone)]
pub struct PgDoctorRepository {
    pool: PgPool,
}

impl PgDoctorRepository {
    /// Create a new PgDoctorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorRepository for PgDoctorRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Doctor>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        load_doctor(&mut conn, id).await
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Doctor>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;

        let rows = select_page(DOCTOR_COLUMNS, "doctors", predicate, page)
            .build_query_as::<DoctorModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(map_db_error)?;

        hydrate_doctors(&mut conn, rows).await
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        select_count("doctors", predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, patch, directives), fields(directives = directives.len()))]
    async fn update_with_specialties(
        &self,
        id: Uuid,
        patch: &DoctorPatch,
        directives: &[SpecialtyDirective],
    ) -> RepoResult<Doctor> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the row so concurrent updates reconcile links one at a time
        let found = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM doctors WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if found.is_none() {
            return Err(DomainError::DoctorNotFound(id));
        }

        // Removals first, so remove-then-re-add of one specialty never collides
        let (removed, added) = SpecialtyDirective::partition(directives);
        unlink_specialties(&mut tx, id, &removed).await?;
        link_specialties(&mut tx, id, &added).await?;

        sqlx::query(
            r"
            UPDATE doctors
            SET name = COALESCE($2, name),
                profile_photo = COALESCE($3, profile_photo),
                contact_number = COALESCE($4, contact_number),
                address = COALESCE($5, address),
                registration_number = COALESCE($6, registration_number),
                experience = COALESCE($7, experience),
                gender = COALESCE($8, gender),
                appointment_fee = COALESCE($9, appointment_fee),
                qualification = COALESCE($10, qualification),
                current_working_place = COALESCE($11, current_working_place),
                designation = COALESCE($12, designation),
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.profile_photo.as_deref())
        .bind(patch.contact_number.as_deref())
        .bind(patch.address.as_deref())
        .bind(patch.registration_number.as_deref())
        .bind(patch.experience)
        .bind(patch.gender.map(|g| g.as_str()))
        .bind(patch.appointment_fee)
        .bind(patch.qualification.as_deref())
        .bind(patch.current_working_place.as_deref())
        .bind(patch.designation.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let doctor = load_doctor(&mut tx, id)
            .await?
            .ok_or(DomainError::DoctorNotFound(id))?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            doctor_id = %id,
            linked = added.len(),
            unlinked = removed.len(),
            "Doctor updated"
        );
        Ok(doctor)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid) -> RepoResult<Doctor> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let email = sqlx::query_scalar::<_, String>(
            r"
            UPDATE doctors
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING email
            ",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::DoctorNotFound(id))?;

        set_user_status(&mut tx, &email, UserStatus::Deleted).await?;

        let doctor = load_doctor(&mut tx, id)
            .await?
            .ok_or(DomainError::DoctorNotFound(id))?;

        tx.commit().await.map_err(map_db_error)?;

        info!(doctor_id = %id, "Doctor soft deleted");
        Ok(doctor)
    }
}
