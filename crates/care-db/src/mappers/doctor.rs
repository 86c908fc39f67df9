//! Doctor entity <-> model mapper

use std::collections::HashMap;

use care_core::entities::{Doctor, Specialty};
use care_core::error::DomainError;
use uuid::Uuid;

use crate::models::{DoctorModel, DoctorSpecialtyModel};

/// Build a doctor from its row and already-loaded specialties
pub fn doctor_from_model(
    model: DoctorModel,
    specialties: Vec<Specialty>,
) -> Result<Doctor, DomainError> {
    Ok(Doctor {
        id: model.id,
        name: model.name,
        email: model.email,
        profile_photo: model.profile_photo,
        contact_number: model.contact_number,
        address: model.address,
        registration_number: model.registration_number,
        experience: model.experience,
        gender: model.gender.parse()?,
        appointment_fee: model.appointment_fee,
        qualification: model.qualification,
        current_working_place: model.current_working_place,
        designation: model.designation,
        average_rating: model.average_rating,
        is_deleted: model.is_deleted,
        specialties,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Pair each doctor row with its specialty rows, keeping the row order
pub fn attach_specialties(
    doctors: Vec<DoctorModel>,
    links: Vec<DoctorSpecialtyModel>,
) -> Result<Vec<Doctor>, DomainError> {
    let mut by_doctor: HashMap<Uuid, Vec<Specialty>> = HashMap::new();
    for link in links {
        by_doctor
            .entry(link.doctor_id)
            .or_default()
            .push(Specialty {
                id: link.id,
                title: link.title,
                icon: link.icon,
                created_at: link.created_at,
                updated_at: link.updated_at,
            });
    }

    doctors
        .into_iter()
        .map(|model| {
            let specialties = by_doctor.remove(&model.id).unwrap_or_default();
            doctor_from_model(model, specialties)
        })
        .collect()
}
