//! Helpers shared by several services

use care_core::traits::UploadedFile;
use care_core::{FilterValue, Predicate};
use tracing::{debug, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Soft-deleted records never show up in listings or lookups
pub(crate) fn not_deleted() -> Predicate {
    Predicate::equals("is_deleted", FilterValue::Bool(false))
}

/// Store the uploaded file, if any, and return its public URL
pub(crate) async fn store_upload(
    ctx: &ServiceContext,
    file: Option<UploadedFile>,
) -> ServiceResult<Option<String>> {
    let Some(file) = file else {
        return Ok(None);
    };
    let size = file.size();
    let url = ctx.file_storage().upload(file).await?;
    debug!(%url, size, "Stored upload");
    Ok(Some(url))
}

/// Remove an upload whose owning record was never written
pub(crate) async fn discard_upload(ctx: &ServiceContext, url: Option<&str>) {
    let Some(url) = url else {
        return;
    };
    match ctx.file_storage().delete(url).await {
        Ok(()) => debug!(%url, "Discarded upload"),
        Err(e) => warn!(%url, error = %e, "Failed to discard upload"),
    }
}
