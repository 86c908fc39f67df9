//! Specialty service

use care_core::entities::Specialty;
use care_core::query::{build_predicate, Page, PageRequest, PaginationOptions, SpecialtyFilter};
use care_core::traits::UploadedFile;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateSpecialtyRequest, QueryParams, SpecialtyResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::support::{discard_upload, store_upload};

pub struct SpecialtyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SpecialtyService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a specialty. An uploaded file replaces any `icon` URL in the body.
    #[instrument(skip(self, request, file), fields(title = %request.title))]
    pub async fn create_specialty(
        &self,
        request: CreateSpecialtyRequest,
        file: Option<UploadedFile>,
    ) -> ServiceResult<SpecialtyResponse> {
        request.validate()?;

        let uploaded = store_upload(self.ctx, file).await?;
        let icon = uploaded.clone().or(request.icon);
        let specialty = Specialty::new(request.title.trim().to_string(), icon);
        if let Err(e) = self.ctx.specialty_repo().create(&specialty).await {
            discard_upload(self.ctx, uploaded.as_deref()).await;
            return Err(e.into());
        }

        info!(specialty_id = %specialty.id, "Specialty created");
        Ok(SpecialtyResponse::from(&specialty))
    }

    #[instrument(skip(self, params))]
    pub async fn list_specialties(
        &self,
        params: &QueryParams,
        options: &PaginationOptions,
    ) -> ServiceResult<Page<SpecialtyResponse>> {
        let page = PageRequest::resolve::<Specialty>(options)?;
        let predicate = build_predicate::<Specialty>(params.filters::<SpecialtyFilter>()?);

        let repo = self.ctx.specialty_repo();
        let (specialties, total) =
            tokio::try_join!(repo.find_many(&predicate, &page), repo.count(&predicate))?;

        Ok(Page::new(specialties, total, &page).map(|s| SpecialtyResponse::from(&s)))
    }

    /// Delete the specialty and every doctor link to it
    #[instrument(skip(self))]
    pub async fn delete_specialty(&self, specialty_id: Uuid) -> ServiceResult<()> {
        self.ctx.specialty_repo().delete(specialty_id).await?;
        info!(specialty_id = %specialty_id, "Specialty deleted");
        Ok(())
    }
}
