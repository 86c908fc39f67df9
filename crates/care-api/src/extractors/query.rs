//! List query extractor
//!
//! Splits a list request's query string into filter pairs and paging options.
//! Filter keys are interpreted by the service for each resource; paging keys
//! are parsed here so a non-numeric `page` or `limit` is rejected up front.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use care_core::PaginationOptions;
use care_service::dto::QueryParams;

use crate::response::ApiError;

/// Filters plus paging for a list endpoint
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub params: QueryParams,
    pub options: PaginationOptions,
}

impl ListQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let params = QueryParams::new(pairs);
        let options = PaginationOptions {
            page: number(&params, "page")?,
            limit: number(&params, "limit")?,
            sort_by: params.get("sortBy").map(String::from),
            sort_order: params.get("sortOrder").map(String::from),
        };
        Ok(Self { params, options })
    }
}

fn number(params: &QueryParams, key: &str) -> Result<Option<i64>, ApiError> {
    params
        .get(key)
        .map(|raw| {
            raw.parse()
                .map_err(|_| ApiError::invalid_query(format!("{key} must be a number, got '{raw}'")))
        })
        .transpose()
}

#[async_trait]
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        ListQuery::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_paging_keys_parsed() {
        let query = ListQuery::from_pairs(pairs(&[
            ("page", "2"),
            ("limit", "5"),
            ("sortBy", "name"),
            ("sortOrder", "asc"),
            ("gender", "FEMALE"),
        ]))
        .unwrap();

        assert_eq!(query.options.page, Some(2));
        assert_eq!(query.options.limit, Some(5));
        assert_eq!(query.options.sort_by.as_deref(), Some("name"));
        assert_eq!(query.options.sort_order.as_deref(), Some("asc"));
        assert_eq!(query.params.get("gender"), Some("FEMALE"));
    }

    #[test]
    fn test_missing_paging_keys_default() {
        let query = ListQuery::from_pairs(Vec::new()).unwrap();
        assert_eq!(query.options, PaginationOptions::default());
    }

    #[test]
    fn test_non_numeric_page_rejected() {
        let err = ListQuery::from_pairs(pairs(&[("page", "two")])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY_PARAMETER");

        assert!(ListQuery::from_pairs(pairs(&[("limit", "1.5")])).is_err());
    }
}
