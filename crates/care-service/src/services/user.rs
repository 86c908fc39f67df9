//! User service
//!
//! Creates accounts together with their role profile, lists accounts and
//! changes account status.

use std::collections::HashSet;

use care_core::entities::{Admin, Doctor, Patient, Profile, Specialty, User};
use care_core::query::{build_predicate, Page, PageRequest, PaginationOptions, UserFilter};
use care_core::traits::UploadedFile;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    AdminInput, AdminResponse, CreateAdminRequest, CreateDoctorRequest, CreatePatientRequest,
    DoctorInput, DoctorResponse, PatientInput, PatientResponse, QueryParams,
    UpdateUserStatusRequest, UserResponse, WithProfilePhoto,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::support::{discard_upload, store_upload};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a patient account. The uploaded file, if any, becomes the
    /// profile photo.
    #[instrument(skip(self, request, file), fields(email = %request.patient.email))]
    pub async fn create_patient(
        &self,
        request: CreatePatientRequest,
        file: Option<UploadedFile>,
    ) -> ServiceResult<PatientResponse> {
        request.validate()?;

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let photo = store_upload(self.ctx, file).await?;
        let input = request.patient.with_profile_photo(photo);

        let patient = patient_from_input(input);
        self.insert_account(&password_hash, Profile::Patient(patient.clone()))
            .await?;

        Ok(PatientResponse::from(&patient))
    }

    /// Create a doctor account, linking the requested specialties
    #[instrument(skip(self, request, file), fields(email = %request.doctor.email))]
    pub async fn create_doctor(
        &self,
        request: CreateDoctorRequest,
        file: Option<UploadedFile>,
    ) -> ServiceResult<DoctorResponse> {
        request.validate()?;

        let specialties = self.resolve_specialties(&request.doctor.specialties).await?;
        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let photo = store_upload(self.ctx, file).await?;
        let input = request.doctor.with_profile_photo(photo);

        let doctor = doctor_from_input(input, specialties);
        self.insert_account(&password_hash, Profile::Doctor(doctor.clone()))
            .await?;

        Ok(DoctorResponse::from(&doctor))
    }

    #[instrument(skip(self, request, file), fields(email = %request.admin.email))]
    pub async fn create_admin(
        &self,
        request: CreateAdminRequest,
        file: Option<UploadedFile>,
    ) -> ServiceResult<AdminResponse> {
        request.validate()?;

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let photo = store_upload(self.ctx, file).await?;
        let input = request.admin.with_profile_photo(photo);

        let admin = admin_from_input(input);
        self.insert_account(&password_hash, Profile::Admin(admin.clone()))
            .await?;

        Ok(AdminResponse::from(&admin))
    }

    /// List user accounts
    #[instrument(skip(self, params))]
    pub async fn list_users(
        &self,
        params: &QueryParams,
        options: &PaginationOptions,
    ) -> ServiceResult<Page<UserResponse>> {
        let page = PageRequest::resolve::<User>(options)?;
        let predicate = build_predicate::<User>(params.filters::<UserFilter>()?);

        let repo = self.ctx.user_repo();
        let (users, total) =
            tokio::try_join!(repo.find_many(&predicate, &page), repo.count(&predicate))?;

        Ok(Page::new(users, total, &page).map(|u| UserResponse::from(&u)))
    }

    /// Change an account's status
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        user_id: Uuid,
        request: UpdateUserStatusRequest,
    ) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .update_status(user_id, request.status)
            .await?;
        info!(user_id = %user_id, status = %user.status, "User status updated");

        Ok(UserResponse::from(&user))
    }

    /// Insert the account and its profile. A failed insert also removes the
    /// profile photo uploaded for it.
    async fn insert_account(&self, password_hash: &str, profile: Profile) -> ServiceResult<()> {
        let user = User::new(profile.email().to_string(), profile.role());
        if let Err(e) = self
            .ctx
            .user_repo()
            .create_with_profile(&user, password_hash, &profile)
            .await
        {
            discard_upload(self.ctx, profile.profile_photo()).await;
            return Err(e.into());
        }
        info!(user_id = %user.id, role = %user.role, "Account created");
        Ok(())
    }

    async fn resolve_specialties(&self, ids: &[Uuid]) -> ServiceResult<Vec<Specialty>> {
        let mut seen = HashSet::new();
        let mut specialties = Vec::with_capacity(ids.len());
        for &id in ids {
            if !seen.insert(id) {
                continue;
            }
            let specialty = self
                .ctx
                .specialty_repo()
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Specialty", id))?;
            specialties.push(specialty);
        }
        Ok(specialties)
    }
}

fn patient_from_input(input: PatientInput) -> Patient {
    let now = Utc::now();
    Patient {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        profile_photo: input.profile_photo,
        contact_number: input.contact_number,
        address: input.address,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

fn doctor_from_input(input: DoctorInput, specialties: Vec<Specialty>) -> Doctor {
    let now = Utc::now();
    Doctor {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        profile_photo: input.profile_photo,
        contact_number: input.contact_number,
        address: input.address,
        registration_number: input.registration_number,
        experience: input.experience,
        gender: input.gender,
        appointment_fee: input.appointment_fee,
        qualification: input.qualification,
        current_working_place: input.current_working_place,
        designation: input.designation,
        average_rating: 0.0,
        is_deleted: false,
        specialties,
        created_at: now,
        updated_at: now,
    }
}

fn admin_from_input(input: AdminInput) -> Admin {
    let now = Utc::now();
    Admin {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        profile_photo: input.profile_photo,
        contact_number: input.contact_number,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}
