//! Model to entity mappers
//!
//! Enum columns are stored as text, so row conversion is fallible:
//! `TryFrom<Model> for Entity` rejects values the domain does not know.

mod appointment;
mod doctor;
mod profile;
mod schedule;
mod user;

pub use doctor::{attach_specialties, doctor_from_model};
