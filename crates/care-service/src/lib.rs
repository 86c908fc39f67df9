//! # care-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;
pub mod webhook;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    AppointmentService, DoctorScheduleService, DoctorService, PatientService, PaymentService,
    ScheduleService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SpecialtyService, UserService,
};
