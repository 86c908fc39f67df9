//! Pagination options and page results

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::Filterable;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_SORT_BY: &str = "createdAt";

/// Raw paging parameters as they arrive on a list request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Resolved paging with defaults applied and bounds clamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub skip: i64,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Pagination {
    /// Apply defaults (page 1, limit 10, createdAt desc) and clamp page and
    /// limit into range. Only an unparsable sort order is an error.
    pub fn calculate(options: &PaginationOptions) -> Result<Self, DomainError> {
        let page = options.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = options.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let sort_order = match options.sort_order.as_deref().map(str::trim) {
            Some(order) if !order.is_empty() => order.parse()?,
            _ => SortOrder::default(),
        };
        let sort_by = options
            .sort_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SORT_BY)
            .to_string();

        Ok(Self {
            page,
            limit,
            skip: (page - 1).saturating_mul(limit),
            sort_by,
            sort_order,
        })
    }

    /// Resolve the sort field against the resource's sortable whitelist
    pub fn for_resource<R: Filterable>(&self) -> Result<PageRequest, DomainError> {
        let sort_column = R::sort_column(&self.sort_by)
            .ok_or_else(|| DomainError::InvalidSortField(self.sort_by.clone()))?;
        Ok(PageRequest {
            page: self.page,
            limit: self.limit,
            skip: self.skip,
            sort_column,
            sort_order: self.sort_order,
        })
    }
}

/// Paging ready for a repository: the sort column is a known column name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    pub skip: i64,
    pub sort_column: &'static str,
    pub sort_order: SortOrder,
}

impl PageRequest {
    /// Calculate and resolve in one step
    pub fn resolve<R: Filterable>(options: &PaginationOptions) -> Result<Self, DomainError> {
        Pagination::calculate(options)?.for_resource::<R>()
    }

    pub fn meta(&self, total: i64) -> PageMeta {
        PageMeta {
            page: self.page,
            limit: self.limit,
            total,
        }
    }
}

/// Paging metadata returned alongside list results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

/// One page of results plus the total count of matching records
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            meta: request.meta(total),
            data,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            meta: self.meta,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
