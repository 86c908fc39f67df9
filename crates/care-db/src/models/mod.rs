//! Database models - SQLx-compatible structs for PostgreSQL tables

mod appointment;
mod doctor;
mod profile;
mod schedule;
mod specialty;
mod user;

pub use appointment::{AppointmentModel, PaymentModel};
pub use doctor::{DoctorModel, DoctorSpecialtyModel};
pub use profile::{AdminModel, PatientModel};
pub use schedule::{DoctorScheduleModel, ScheduleModel};
pub use specialty::SpecialtyModel;
pub use user::UserModel;
