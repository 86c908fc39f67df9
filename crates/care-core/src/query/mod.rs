//! Query value objects - pagination and filter predicates
//!
//! Services turn raw request parameters into a [`Predicate`] and a
//! [`PageRequest`]; repositories translate both into SQL. Nothing here knows
//! about the database.

mod filters;
mod pagination;
mod predicate;

pub use filters::{
    build_predicate, schedules_free_for, specialty_title, AppointmentFilter, DoctorFilter,
    FilterField, FilterSet, Filterable, PatientFilter, ScheduleFilter, SpecialtyFilter,
    UserFilter,
};
pub use pagination::{
    Page, PageMeta, PageRequest, Pagination, PaginationOptions, SortOrder, DEFAULT_LIMIT,
    DEFAULT_PAGE, DEFAULT_SORT_BY, MAX_LIMIT,
};
pub use predicate::{Comparison, FilterValue, Matchable, Predicate, Relation};
