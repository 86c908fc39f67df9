//! Schedule and specialty mappers

use care_core::entities::{DoctorSchedule, Schedule, Specialty};

use crate::models::{DoctorScheduleModel, ScheduleModel, SpecialtyModel};

impl From<ScheduleModel> for Schedule {
    fn from(model: ScheduleModel) -> Self {
        Schedule {
            id: model.id,
            start_date_time: model.start_date_time,
            end_date_time: model.end_date_time,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<DoctorScheduleModel> for DoctorSchedule {
    fn from(model: DoctorScheduleModel) -> Self {
        DoctorSchedule {
            doctor_id: model.doctor_id,
            schedule_id: model.schedule_id,
            is_booked: model.is_booked,
            appointment_id: model.appointment_id,
            created_at: model.created_at,
        }
    }
}

impl From<SpecialtyModel> for Specialty {
    fn from(model: SpecialtyModel) -> Self {
        Specialty {
            id: model.id,
            title: model.title,
            icon: model.icon,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
