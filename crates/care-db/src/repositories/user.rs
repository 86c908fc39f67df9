//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use care_core::entities::{Admin, Patient, Profile, User, UserStatus};
use care_core::error::DomainError;
use care_core::query::{PageRequest, Predicate};
use care_core::traits::{RepoResult, UserRepository};

use crate::filter::{select_count, select_page};
use crate::models::UserModel;

use super::error::{map_constraint_violation, map_db_error, map_unique_violation};
use super::links::{insert_doctor, orphan_profile};

const USER_COLUMNS: &str =
    "id, email, role, status, needs_password_change, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_patient(conn: &mut PgConnection, patient: &Patient) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO patients (id, name, email, profile_photo, contact_number, address,
                              is_deleted, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ",
    )
    .bind(patient.id)
    .bind(&patient.name)
    .bind(&patient.email)
    .bind(&patient.profile_photo)
    .bind(&patient.contact_number)
    .bind(&patient.address)
    .bind(patient.is_deleted)
    .bind(patient.created_at)
    .bind(patient.updated_at)
    .execute(conn)
    .await
    .map_err(|e| map_constraint_violation(e, || DomainError::EmailAlreadyExists, orphan_profile))?;

    Ok(())
}

async fn insert_admin(conn: &mut PgConnection, admin: &Admin) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO admins (id, name, email, profile_photo, contact_number,
                            is_deleted, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ",
    )
    .bind(admin.id)
    .bind(&admin.name)
    .bind(&admin.email)
    .bind(&admin.profile_photo)
    .bind(&admin.contact_number)
    .bind(admin.is_deleted)
    .bind(admin.created_at)
    .bind(admin.updated_at)
    .execute(conn)
    .await
    .map_err(|e| map_constraint_violation(e, || DomainError::EmailAlreadyExists, orphan_profile))?;

    Ok(())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash, profile), fields(email = %user.email, role = %user.role))]
    async fn create_with_profile(
        &self,
        user: &User,
        password_hash: &str,
        profile: &Profile,
    ) -> RepoResult<()> {
        // Account and profile commit together or not at all
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, role, status, needs_password_change,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(user.needs_password_change)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        match profile {
            Profile::Patient(patient) => insert_patient(&mut tx, patient).await?,
            Profile::Doctor(doctor) => insert_doctor(&mut tx, doctor).await?,
            Profile::Admin(admin) => insert_admin(&mut tx, admin).await?,
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(user_id = %user.id, "User created with profile");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_many(&self, predicate: &Predicate, page: &PageRequest) -> RepoResult<Vec<User>> {
        let rows = select_page(USER_COLUMNS, "users", predicate, page)
            .build_query_as::<UserModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        select_count("users", predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: UserStatus) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            UPDATE users
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .ok_or(DomainError::UserNotFound(id))
            .and_then(User::try_from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
