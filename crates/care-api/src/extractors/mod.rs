//! Axum extractors for request handling
//!
//! Custom extractors for validation, list queries, form uploads and ids.

mod multipart;
mod path;
mod query;
mod validated;

pub use multipart::{FormData, DATA_FIELD, FILE_FIELD};
pub use path::IdPath;
pub use query::ListQuery;
pub use validated::ValidatedJson;
