//! Patient / admin entity <-> model mappers

use care_core::entities::{Admin, Patient};

use crate::models::{AdminModel, PatientModel};

impl From<PatientModel> for Patient {
    fn from(model: PatientModel) -> Self {
        Patient {
            id: model.id,
            name: model.name,
            email: model.email,
            profile_photo: model.profile_photo,
            contact_number: model.contact_number,
            address: model.address,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AdminModel> for Admin {
    fn from(model: AdminModel) -> Self {
        Admin {
            id: model.id,
            name: model.name,
            email: model.email,
            profile_photo: model.profile_photo,
            contact_number: model.contact_number,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
