//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod appointments;
pub mod doctors;
pub mod health;
pub mod patients;
pub mod schedules;
pub mod specialties;
pub mod users;
pub mod webhook;
