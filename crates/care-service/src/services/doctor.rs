//! Doctor service
//!
//! Listing with specialty filters, profile updates that reconcile specialty
//! links, and soft deletion.

use care_core::entities::Doctor;
use care_core::query::{
    build_predicate, specialty_title, DoctorFilter, Page, PageRequest, PaginationOptions,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{DoctorResponse, QueryParams, UpdateDoctorRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::support::not_deleted;

/// Query key that filters doctors by specialty title
pub const SPECIALTIES_PARAM: &str = "specialties";

/// Doctor service
pub struct DoctorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DoctorService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List doctors that are not deleted
    #[instrument(skip(self, params))]
    pub async fn list_doctors(
        &self,
        params: &QueryParams,
        options: &PaginationOptions,
    ) -> ServiceResult<Page<DoctorResponse>> {
        let page = PageRequest::resolve::<Doctor>(options)?;

        let mut filters = params.filters::<DoctorFilter>()?;
        if let Some(term) = params.get(SPECIALTIES_PARAM) {
            filters = filters.with_relation(specialty_title(term));
        }
        let predicate = build_predicate::<Doctor>(filters).and(not_deleted());

        let repo = self.ctx.doctor_repo();
        let (doctors, total) =
            tokio::try_join!(repo.find_many(&predicate, &page), repo.count(&predicate))?;

        Ok(Page::new(doctors, total, &page).map(|d| DoctorResponse::from(&d)))
    }

    #[instrument(skip(self))]
    pub async fn get_doctor(&self, doctor_id: Uuid) -> ServiceResult<DoctorResponse> {
        let doctor = self.get_doctor_entity(doctor_id).await?;
        Ok(DoctorResponse::from(&doctor))
    }

    /// Get a doctor that is not deleted
    pub async fn get_doctor_entity(&self, doctor_id: Uuid) -> ServiceResult<Doctor> {
        self.ctx
            .doctor_repo()
            .find_by_id(doctor_id)
            .await?
            .filter(|d| !d.is_deleted)
            .ok_or_else(|| ServiceError::not_found("Doctor", doctor_id))
    }

    /// Apply a partial update. Specialty directives flagged `isDeleted` are
    /// unlinked, the rest linked, and the scalar fields written, all in one
    /// transaction.
    #[instrument(skip(self, request))]
    pub async fn update_doctor(
        &self,
        doctor_id: Uuid,
        request: UpdateDoctorRequest,
    ) -> ServiceResult<DoctorResponse> {
        request.validate()?;
        self.get_doctor_entity(doctor_id).await?;

        let (patch, directives) = request.into_parts();
        let doctor = self
            .ctx
            .doctor_repo()
            .update_with_specialties(doctor_id, &patch, &directives)
            .await?;

        info!(
            doctor_id = %doctor_id,
            specialty_changes = directives.len(),
            "Doctor updated"
        );
        Ok(DoctorResponse::from(&doctor))
    }

    /// Soft delete the doctor and mark its account deleted
    #[instrument(skip(self))]
    pub async fn delete_doctor(&self, doctor_id: Uuid) -> ServiceResult<DoctorResponse> {
        self.get_doctor_entity(doctor_id).await?;
        let doctor = self.ctx.doctor_repo().soft_delete(doctor_id).await?;
        info!(doctor_id = %doctor_id, "Doctor deleted");
        Ok(DoctorResponse::from(&doctor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, MemoryStore};
    use care_core::entities::{Gender, SpecialtyDirective, UserStatus};

    #[tokio::test]
    async fn test_update_reconciles_specialties() {
        let store = MemoryStore::new();
        let s1 = store.add_specialty("Cardiology");
        let s2 = store.add_specialty("Neurology");
        let doctor = store.add_doctor("Dr. One", &[s1.clone()]);
        let ctx = testing::context(&store);
        let service = DoctorService::new(&ctx);

        let request = UpdateDoctorRequest {
            name: Some("Dr. Renamed".to_string()),
            specialties: vec![
                SpecialtyDirective {
                    specialty_id: s1.id,
                    is_deleted: true,
                },
                SpecialtyDirective {
                    specialty_id: s2.id,
                    is_deleted: false,
                },
            ],
            ..Default::default()
        };
        let updated = service.update_doctor(doctor.id, request).await.unwrap();

        assert_eq!(updated.name, "Dr. Renamed");
        let ids: Vec<Uuid> = updated.specialties.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![s2.id]);
        assert_eq!(updated.contact_number, doctor.contact_number);
    }

    #[tokio::test]
    async fn test_update_with_unknown_specialty_changes_nothing() {
        let store = MemoryStore::new();
        let s1 = store.add_specialty("Cardiology");
        let doctor = store.add_doctor("Dr. One", &[s1.clone()]);
        let ctx = testing::context(&store);
        let service = DoctorService::new(&ctx);

        let request = UpdateDoctorRequest {
            name: Some("Never".to_string()),
            specialties: vec![
                SpecialtyDirective {
                    specialty_id: s1.id,
                    is_deleted: true,
                },
                SpecialtyDirective {
                    specialty_id: Uuid::new_v4(),
                    is_deleted: false,
                },
            ],
            ..Default::default()
        };
        assert!(service.update_doctor(doctor.id, request).await.is_err());

        let stored = service.get_doctor(doctor.id).await.unwrap();
        assert_eq!(stored.name, "Dr. One");
        assert_eq!(stored.specialties.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_doctor_is_not_found() {
        let store = MemoryStore::new();
        let ctx = testing::context(&store);
        let service = DoctorService::new(&ctx);

        let err = service
            .update_doctor(Uuid::new_v4(), UpdateDoctorRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let store = MemoryStore::new();
        let cardiology = store.add_specialty("Cardiology");
        store.add_doctor("Ann Heart", &[cardiology]);
        store.add_doctor("Bob Brain", &[]);
        let ctx = testing::context(&store);
        let service = DoctorService::new(&ctx);
        let options = PaginationOptions::default();

        let all = service
            .list_doctors(&QueryParams::default(), &options)
            .await
            .unwrap();
        assert_eq!(all.meta.total, 2);

        let params: QueryParams = [("specialties", "cardio")].into_iter().collect();
        let page = service.list_doctors(&params, &options).await.unwrap();
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.data[0].name, "Ann Heart");

        let params: QueryParams = [("searchTerm", "BRAIN")].into_iter().collect();
        let page = service.list_doctors(&params, &options).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Bob Brain");

        let params: QueryParams = [("gender", Gender::Male.as_str())].into_iter().collect();
        let page = service.list_doctors(&params, &options).await.unwrap();
        assert_eq!(page.meta.total, 2);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_doctor() {
        let store = MemoryStore::new();
        let doctor = store.add_doctor("Dr. Gone", &[]);
        let ctx = testing::context(&store);
        let service = DoctorService::new(&ctx);

        let deleted = service.delete_doctor(doctor.id).await.unwrap();
        assert!(deleted.is_deleted);
        assert_eq!(
            store.user_by_email(&doctor.email).unwrap().status,
            UserStatus::Deleted
        );

        assert_eq!(service.get_doctor(doctor.id).await.unwrap_err().status_code(), 404);
        let page = service
            .list_doctors(&QueryParams::default(), &PaginationOptions::default())
            .await
            .unwrap();
        assert_eq!(page.meta.total, 0);
        assert_eq!(service.delete_doctor(doctor.id).await.unwrap_err().status_code(), 404);
    }
}
