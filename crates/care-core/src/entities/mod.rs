//! Domain entities - core business objects

mod appointment;
mod doctor;
mod patient;
mod schedule;
mod specialty;
mod user;

pub use appointment::{Appointment, AppointmentStatus, CheckoutSettlement, Payment, PaymentStatus};
pub use doctor::{Doctor, DoctorPatch, Gender, SpecialtyDirective};
pub use patient::{Admin, Patient, Profile};
pub use schedule::{DoctorSchedule, Schedule};
pub use specialty::Specialty;
pub use user::{User, UserRole, UserStatus};
