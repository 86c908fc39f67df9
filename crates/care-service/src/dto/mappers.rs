//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use care_core::entities::{
    Admin, Appointment, Doctor, DoctorSchedule, Patient, Payment, Schedule, Specialty, User,
};

use super::responses::{
    AdminResponse, AppointmentResponse, DoctorResponse, DoctorScheduleResponse, PatientResponse,
    PaymentResponse, ScheduleResponse, SpecialtyResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            needs_password_change: user.needs_password_change,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&Patient> for PatientResponse {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name.clone(),
            email: patient.email.clone(),
            profile_photo: patient.profile_photo.clone(),
            contact_number: patient.contact_number.clone(),
            address: patient.address.clone(),
            is_deleted: patient.is_deleted,
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            profile_photo: admin.profile_photo.clone(),
            contact_number: admin.contact_number.clone(),
            is_deleted: admin.is_deleted,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

// ============================================================================
// Doctor Mappers
// ============================================================================

impl From<&Specialty> for SpecialtyResponse {
    fn from(specialty: &Specialty) -> Self {
        Self {
            id: specialty.id,
            title: specialty.title.clone(),
            icon: specialty.icon.clone(),
            created_at: specialty.created_at,
        }
    }
}

impl From<&Doctor> for DoctorResponse {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name.clone(),
            email: doctor.email.clone(),
            profile_photo: doctor.profile_photo.clone(),
            contact_number: doctor.contact_number.clone(),
            address: doctor.address.clone(),
            registration_number: doctor.registration_number.clone(),
            experience: doctor.experience,
            gender: doctor.gender,
            appointment_fee: doctor.appointment_fee,
            qualification: doctor.qualification.clone(),
            current_working_place: doctor.current_working_place.clone(),
            designation: doctor.designation.clone(),
            average_rating: doctor.average_rating,
            is_deleted: doctor.is_deleted,
            specialties: doctor.specialties.iter().map(SpecialtyResponse::from).collect(),
            created_at: doctor.created_at,
            updated_at: doctor.updated_at,
        }
    }
}

// ============================================================================
// Schedule Mappers
// ============================================================================

impl From<&Schedule> for ScheduleResponse {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id,
            start_date_time: schedule.start_date_time,
            end_date_time: schedule.end_date_time,
            created_at: schedule.created_at,
        }
    }
}

impl From<&DoctorSchedule> for DoctorScheduleResponse {
    fn from(link: &DoctorSchedule) -> Self {
        Self {
            doctor_id: link.doctor_id,
            schedule_id: link.schedule_id,
            is_booked: link.is_booked,
            appointment_id: link.appointment_id,
            created_at: link.created_at,
        }
    }
}

// ============================================================================
// Appointment Mappers
// ============================================================================

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            schedule_id: appointment.schedule_id,
            video_calling_id: appointment.video_calling_id.clone(),
            status: appointment.status,
            payment_status: appointment.payment_status,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id,
            appointment_id: payment.appointment_id,
            amount: payment.amount,
            transaction_id: payment.transaction_id.clone(),
            status: payment.status,
        }
    }
}
