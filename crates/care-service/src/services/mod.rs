//! Business logic services
//!
//! Each service borrows the shared `ServiceContext`, validates its input,
//! and delegates persistence to the repository ports.

pub mod appointment;
pub mod context;
pub mod doctor;
pub mod doctor_schedule;
pub mod error;
pub mod patient;
pub mod payment;
pub mod schedule;
pub mod specialty;
mod support;
pub mod user;

pub use appointment::AppointmentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use doctor::DoctorService;
pub use doctor_schedule::DoctorScheduleService;
pub use error::{ServiceError, ServiceResult};
pub use patient::PatientService;
pub use payment::PaymentService;
pub use schedule::ScheduleService;
pub use specialty::SpecialtyService;
pub use user::UserService;
