//! Statements shared by several repositories, run on a caller-owned connection
//! so they can join the caller's transaction

use care_core::entities::{Doctor, UserStatus};
use care_core::error::DomainError;
use care_core::traits::RepoResult;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::mappers::attach_specialties;
use crate::models::{DoctorModel, DoctorSpecialtyModel};

use super::error::{map_constraint_violation, map_db_error, unknown_specialty};

pub(crate) const DOCTOR_COLUMNS: &str = "id, name, email, profile_photo, contact_number, address, \
     registration_number, experience, gender, appointment_fee, qualification, \
     current_working_place, designation, average_rating, is_deleted, created_at, updated_at";

/// Insert doctor <-> specialty links
pub(crate) async fn link_specialties(
    conn: &mut PgConnection,
    doctor_id: Uuid,
    specialty_ids: &[Uuid],
) -> RepoResult<()> {
    if specialty_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r"
        INSERT INTO doctor_specialties (doctor_id, specialty_id)
        SELECT $1, UNNEST($2::uuid[])
        ",
    )
    .bind(doctor_id)
    .bind(specialty_ids)
    .execute(conn)
    .await
    .map_err(|e| {
        map_constraint_violation(e, || DomainError::DoctorSpecialtyExists, unknown_specialty)
    })?;

    Ok(())
}

/// Remove doctor <-> specialty links
pub(crate) async fn unlink_specialties(
    conn: &mut PgConnection,
    doctor_id: Uuid,
    specialty_ids: &[Uuid],
) -> RepoResult<()> {
    if specialty_ids.is_empty() {
        return Ok(());
    }

    sqlx::query("DELETE FROM doctor_specialties WHERE doctor_id = $1 AND specialty_id = ANY($2)")
        .bind(doctor_id)
        .bind(specialty_ids)
        .execute(conn)
        .await
        .map_err(map_db_error)?;

    Ok(())
}

/// Specialty rows for the given doctors, tagged with the doctor id
pub(crate) async fn load_specialties(
    conn: &mut PgConnection,
    doctor_ids: &[Uuid],
) -> RepoResult<Vec<DoctorSpecialtyModel>> {
    if doctor_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, DoctorSpecialtyModel>(
        r"
        SELECT ds.doctor_id, s.id, s.title, s.icon, s.created_at, s.updated_at
        FROM doctor_specialties ds
        JOIN specialties s ON s.id = ds.specialty_id
        WHERE ds.doctor_id = ANY($1)
        ORDER BY s.title
        ",
    )
    .bind(doctor_ids)
    .fetch_all(conn)
    .await
    .map_err(map_db_error)
}

/// Load one doctor with its specialties
pub(crate) async fn load_doctor(conn: &mut PgConnection, id: Uuid) -> RepoResult<Option<Doctor>> {
    let model = sqlx::query_as::<_, DoctorModel>(&format!(
        "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    match model {
        Some(model) => {
            let links = load_specialties(conn, &[id]).await?;
            Ok(Some(attach_specialties(vec![model], links)?.remove(0)))
        }
        None => Ok(None),
    }
}

/// Set the status of the account owning `email`
pub(crate) async fn set_user_status(
    conn: &mut PgConnection,
    email: &str,
    status: UserStatus,
) -> RepoResult<()> {
    sqlx::query("UPDATE users SET status = $2, updated_at = NOW() WHERE email = $1")
        .bind(email)
        .bind(status.as_str())
        .execute(conn)
        .await
        .map_err(map_db_error)?;

    Ok(())
}

/// Foreign-key violation when a profile's email has no account
pub(crate) fn orphan_profile() -> DomainError {
    DomainError::ValidationError("Profile email has no matching user".to_string())
}

/// Insert a doctor profile row and its initial specialty links
pub(crate) async fn insert_doctor(conn: &mut PgConnection, doctor: &Doctor) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO doctors (id, name, email, profile_photo, contact_number, address,
                             registration_number, experience, gender, appointment_fee,
                             qualification, current_working_place, designation, average_rating,
                             is_deleted, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ",
    )
    .bind(doctor.id)
    .bind(&doctor.name)
    .bind(&doctor.email)
    .bind(&doctor.profile_photo)
    .bind(&doctor.contact_number)
    .bind(&doctor.address)
    .bind(&doctor.registration_number)
    .bind(doctor.experience)
    .bind(doctor.gender.as_str())
    .bind(doctor.appointment_fee)
    .bind(&doctor.qualification)
    .bind(&doctor.current_working_place)
    .bind(&doctor.designation)
    .bind(doctor.average_rating)
    .bind(doctor.is_deleted)
    .bind(doctor.created_at)
    .bind(doctor.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_constraint_violation(e, || DomainError::EmailAlreadyExists, orphan_profile))?;

    let specialty_ids: Vec<Uuid> = doctor.specialties.iter().map(|s| s.id).collect();
    link_specialties(conn, doctor.id, &specialty_ids).await
}

/// Build a doctor list page's entities from rows, loading specialties in one query
pub(crate) async fn hydrate_doctors(
    conn: &mut PgConnection,
    models: Vec<DoctorModel>,
) -> RepoResult<Vec<Doctor>> {
    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let links = load_specialties(conn, &ids).await?;
    attach_specialties(models, links)
}
