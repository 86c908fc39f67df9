//! Appointment / payment entity <-> model mappers

use care_core::entities::{Appointment, Payment};
use care_core::error::DomainError;

use crate::models::{AppointmentModel, PaymentModel};

impl TryFrom<AppointmentModel> for Appointment {
    type Error = DomainError;

    fn try_from(model: AppointmentModel) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: model.id,
            patient_id: model.patient_id,
            doctor_id: model.doctor_id,
            schedule_id: model.schedule_id,
            video_calling_id: model.video_calling_id,
            status: model.status.parse()?,
            payment_status: model.payment_status.parse()?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<PaymentModel> for Payment {
    type Error = DomainError;

    fn try_from(model: PaymentModel) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: model.id,
            appointment_id: model.appointment_id,
            amount: model.amount,
            transaction_id: model.transaction_id,
            status: model.status.parse()?,
            payment_gateway_data: model.payment_gateway_data,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
