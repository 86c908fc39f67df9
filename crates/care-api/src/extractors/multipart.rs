//! Form-data extractor for create endpoints that accept an upload
//!
//! A multipart body carries the JSON payload in a `data` field and an optional
//! `file` field. A plain `application/json` body is accepted as the payload
//! with no file.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use care_core::UploadedFile;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use super::validated::json_rejection;
use crate::response::ApiError;

/// Name of the multipart field holding the JSON payload
pub const DATA_FIELD: &str = "data";
/// Name of the multipart field holding the upload
pub const FILE_FIELD: &str = "file";

/// Validated payload plus the optional uploaded file
#[derive(Debug)]
pub struct FormData<T> {
    pub data: T,
    pub file: Option<UploadedFile>,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

#[async_trait]
impl<S, T> FromRequest<S> for FormData<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(json_rejection)?;
            data.validate()?;
            return Ok(Self { data, file: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let mut data = None;
        let mut file = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?
        {
            match field.name() {
                Some(DATA_FIELD) => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                    let parsed: T = serde_json::from_str(&text)
                        .map_err(|e| ApiError::invalid_body(format!("data: {e}")))?;
                    data = Some(parsed);
                }
                Some(FILE_FIELD) => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field.content_type().map(String::from);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                    if !bytes.is_empty() {
                        file = Some(UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                other => debug!(field = ?other, "Ignoring unknown multipart field"),
            }
        }

        let data = data.ok_or_else(|| {
            ApiError::invalid_body(format!("Missing '{DATA_FIELD}' field in form data"))
        })?;
        data.validate()?;

        Ok(Self { data, file })
    }
}
