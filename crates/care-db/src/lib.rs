//! # care-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `care-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Rendering filter predicates and paging into SQL
//! - Repository implementations, with multi-row writes in transactions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use care_db::pool::{create_pool, PoolConfig};
//! use care_db::repositories::PgDoctorRepository;
//! use care_core::traits::DoctorRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     let doctors = PgDoctorRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod filter;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAppointmentRepository, PgDoctorRepository, PgDoctorScheduleRepository, PgPatientRepository,
    PgPaymentRepository, PgScheduleRepository, PgSpecialtyRepository, PgUserRepository,
};
