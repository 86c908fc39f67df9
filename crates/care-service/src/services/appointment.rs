//! Appointment service
//!
//! Booking reserves the doctor's slot, creates the appointment and an unpaid
//! payment in one transaction. Payment itself is settled by the webhook.

use care_core::entities::{Appointment, Payment};
use care_core::query::{
    build_predicate, AppointmentFilter, Page, PageRequest, PaginationOptions,
};
use tracing::{info, instrument};

use crate::dto::{
    AppointmentResponse, BookingResponse, CreateAppointmentRequest, PaymentResponse, QueryParams,
};

use super::context::ServiceContext;
use super::doctor::DoctorService;
use super::error::ServiceResult;
use super::patient::PatientService;

pub struct AppointmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AppointmentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Book a slot. The payment amount is the doctor's appointment fee.
    #[instrument(skip(self))]
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> ServiceResult<BookingResponse> {
        let patient = PatientService::new(self.ctx)
            .get_patient_entity(request.patient_id)
            .await?;
        let doctor = DoctorService::new(self.ctx)
            .get_doctor_entity(request.doctor_id)
            .await?;

        let appointment = Appointment::new(patient.id, doctor.id, request.schedule_id);
        let payment = Payment::new(appointment.id, doctor.appointment_fee);

        self.ctx
            .appointment_repo()
            .create_with_payment(&appointment, &payment)
            .await?;

        info!(
            appointment_id = %appointment.id,
            payment_id = %payment.id,
            amount = payment.amount,
            "Appointment booked"
        );
        Ok(BookingResponse {
            appointment: AppointmentResponse::from(&appointment),
            payment: PaymentResponse::from(&payment),
        })
    }

    #[instrument(skip(self, params))]
    pub async fn list_appointments(
        &self,
        params: &QueryParams,
        options: &PaginationOptions,
    ) -> ServiceResult<Page<AppointmentResponse>> {
        let page = PageRequest::resolve::<Appointment>(options)?;
        let predicate = build_predicate::<Appointment>(params.filters::<AppointmentFilter>()?);

        let repo = self.ctx.appointment_repo();
        let (appointments, total) =
            tokio::try_join!(repo.find_many(&predicate, &page), repo.count(&predicate))?;

        Ok(Page::new(appointments, total, &page).map(|a| AppointmentResponse::from(&a)))
    }
}
