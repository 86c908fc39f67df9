//! # care-core
//!
//! Domain layer containing entities, query value objects (pagination and filter
//! predicates), and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod query;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Admin, Appointment, AppointmentStatus, CheckoutSettlement, Doctor, DoctorPatch,
    DoctorSchedule, Gender, Patient, Payment, PaymentStatus, Profile, Schedule, Specialty,
    SpecialtyDirective, User, UserRole, UserStatus,
};
pub use error::DomainError;
pub use query::{
    build_predicate, AppointmentFilter, Comparison, DoctorFilter, FilterField, FilterSet,
    FilterValue, Filterable, Matchable, Page, PageMeta, PageRequest, Pagination,
    PaginationOptions, PatientFilter, Predicate, Relation, ScheduleFilter, SortOrder,
    SpecialtyFilter, UserFilter,
};
pub use traits::{
    AppointmentRepository, DoctorRepository, DoctorScheduleRepository, FileStorage,
    PatientRepository, PaymentRepository, RepoResult, ScheduleRepository, SpecialtyRepository,
    UploadedFile, UserRepository,
};
