//! Patient service

use care_core::entities::Patient;
use care_core::query::{build_predicate, Page, PageRequest, PaginationOptions, PatientFilter};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{PatientResponse, QueryParams};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::support::not_deleted;

pub struct PatientService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PatientService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, params))]
    pub async fn list_patients(
        &self,
        params: &QueryParams,
        options: &PaginationOptions,
    ) -> ServiceResult<Page<PatientResponse>> {
        let page = PageRequest::resolve::<Patient>(options)?;
        let predicate =
            build_predicate::<Patient>(params.filters::<PatientFilter>()?).and(not_deleted());

        let repo = self.ctx.patient_repo();
        let (patients, total) =
            tokio::try_join!(repo.find_many(&predicate, &page), repo.count(&predicate))?;

        Ok(Page::new(patients, total, &page).map(|p| PatientResponse::from(&p)))
    }

    #[instrument(skip(self))]
    pub async fn get_patient(&self, patient_id: Uuid) -> ServiceResult<PatientResponse> {
        let patient = self.get_patient_entity(patient_id).await?;
        Ok(PatientResponse::from(&patient))
    }

    pub async fn get_patient_entity(&self, patient_id: Uuid) -> ServiceResult<Patient> {
        self.ctx
            .patient_repo()
            .find_by_id(patient_id)
            .await?
            .filter(|p| !p.is_deleted)
            .ok_or_else(|| ServiceError::not_found("Patient", patient_id))
    }

    /// Soft delete the patient and mark its account deleted
    #[instrument(skip(self))]
    pub async fn delete_patient(&self, patient_id: Uuid) -> ServiceResult<PatientResponse> {
        self.get_patient_entity(patient_id).await?;
        let patient = self.ctx.patient_repo().soft_delete(patient_id).await?;
        info!(patient_id = %patient_id, "Patient deleted");
        Ok(PatientResponse::from(&patient))
    }
}
