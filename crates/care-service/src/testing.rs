//! In-memory repositories for service tests
//!
//! One `MemoryStore` implements every repository trait over a shared state.
//! Multi-row writes run against a copy of the state that only replaces the
//! real one when the whole operation succeeds, mirroring a transaction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use care_core::entities::{
    Admin, Appointment, CheckoutSettlement, Doctor, DoctorPatch, DoctorSchedule, Gender, Patient,
    Payment, Profile, Schedule, Specialty, SpecialtyDirective, User, UserStatus,
};
use care_core::query::{FilterValue, Matchable, PageRequest, Predicate, Relation, SortOrder};
use care_core::traits::{
    AppointmentRepository, DoctorRepository, DoctorScheduleRepository, FileStorage,
    PatientRepository, PaymentRepository, RepoResult, ScheduleRepository, SpecialtyRepository,
    UploadedFile, UserRepository,
};
use care_core::DomainError;

use crate::services::{ServiceContext, ServiceContextBuilder};

pub const WEBHOOK_SECRET: &str = "whsec_memory";

#[derive(Debug, Clone, Default)]
struct State {
    users: Vec<(User, String)>,
    patients: Vec<Patient>,
    admins: Vec<Admin>,
    doctors: Vec<Doctor>,
    specialties: Vec<Specialty>,
    /// (doctor_id, specialty_id)
    doctor_specialties: Vec<(Uuid, Uuid)>,
    schedules: Vec<Schedule>,
    doctor_schedules: Vec<DoctorSchedule>,
    appointments: Vec<Appointment>,
    payments: Vec<Payment>,
}

impl State {
    fn hydrate(&self, doctor: &Doctor) -> Doctor {
        let mut doctor = doctor.clone();
        doctor.specialties = self
            .doctor_specialties
            .iter()
            .filter(|(d, _)| *d == doctor.id)
            .filter_map(|(_, s)| self.specialties.iter().find(|sp| sp.id == *s).cloned())
            .collect();
        doctor
    }

    fn set_user_status(&mut self, email: &str, status: UserStatus) {
        if let Some((user, _)) = self.users.iter_mut().find(|(u, _)| u.email == email) {
            user.status = status;
        }
    }

    fn link_specialty(&mut self, doctor_id: Uuid, specialty_id: Uuid) -> RepoResult<()> {
        if !self.specialties.iter().any(|s| s.id == specialty_id) {
            return Err(DomainError::ValidationError(
                "One or more specialties do not exist".to_string(),
            ));
        }
        if self.doctor_specialties.contains(&(doctor_id, specialty_id)) {
            return Err(DomainError::DoctorSpecialtyExists);
        }
        self.doctor_specialties.push((doctor_id, specialty_id));
        Ok(())
    }
}

/// Schedule seen together with its doctor links
struct ScheduleView<'a> {
    schedule: &'a Schedule,
    links: &'a [DoctorSchedule],
}

impl Matchable for ScheduleView<'_> {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        self.schedule.column_value(column)
    }

    fn matches_related(&self, relation: Relation, predicate: &Predicate) -> bool {
        match relation {
            Relation::DoctorSchedules => self
                .links
                .iter()
                .filter(|l| l.schedule_id == self.schedule.id)
                .any(|l| predicate.matches(l)),
            Relation::DoctorSpecialties => false,
        }
    }
}

fn paged<T>(mut rows: Vec<T>, page: &PageRequest, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by_key(|r| created_at(r));
    if page.sort_order == SortOrder::Desc {
        rows.reverse();
    }
    rows.into_iter()
        .skip(usize::try_from(page.skip).unwrap_or(0))
        .take(usize::try_from(page.limit).unwrap_or(0))
        .collect()
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    fail_profile_insert: AtomicBool,
    fail_uploads: AtomicBool,
    uploads: Mutex<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

/// Service context wired entirely to `store`
pub fn context(store: &MemoryStore) -> ServiceContext {
    context_with_storage(store, Arc::new(store.clone()))
}

/// Repositories from `store`, files written to `storage`
pub fn context_with_storage(store: &MemoryStore, storage: Arc<dyn FileStorage>) -> ServiceContext {
    let repo = Arc::new(store.clone());
    ServiceContextBuilder::new()
        .user_repo(repo.clone())
        .doctor_repo(repo.clone())
        .patient_repo(repo.clone())
        .specialty_repo(repo.clone())
        .schedule_repo(repo.clone())
        .doctor_schedule_repo(repo.clone())
        .appointment_repo(repo.clone())
        .payment_repo(repo.clone())
        .file_storage(storage)
        .webhook_secret(WEBHOOK_SECRET)
        .build()
        .unwrap()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> T {
        f(&self.inner.state.lock().unwrap())
    }

    fn transaction<T>(&self, f: impl FnOnce(&mut State) -> RepoResult<T>) -> RepoResult<T> {
        let mut guard = self.inner.state.lock().unwrap();
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        *guard = draft;
        Ok(out)
    }

    // === Fault injection ===

    pub fn fail_next_profile_insert(&self) {
        self.inner.fail_profile_insert.store(true, Ordering::SeqCst);
    }

    /// URLs of uploads that are still stored
    pub fn stored_uploads(&self) -> Vec<String> {
        self.inner.uploads.lock().unwrap().clone()
    }

    pub fn fail_uploads(&self) {
        self.inner.fail_uploads.store(true, Ordering::SeqCst);
    }

    // === Seeding ===

    pub fn add_specialty(&self, title: &str) -> Specialty {
        let specialty = Specialty::new(title.to_string(), None);
        self.transaction(|s| {
            s.specialties.push(specialty.clone());
            Ok(())
        })
        .unwrap();
        specialty
    }

    pub fn add_doctor(&self, name: &str, specialties: &[Specialty]) -> Doctor {
        let now = Utc::now();
        let email = format!("{}.{}@example.com", name.to_lowercase().replace(' ', "."), Uuid::new_v4().simple());
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.clone(),
            profile_photo: None,
            contact_number: "0200".to_string(),
            address: None,
            registration_number: "REG".to_string(),
            experience: 3,
            gender: Gender::Male,
            appointment_fee: 250,
            qualification: "MBBS".to_string(),
            current_working_place: "Clinic".to_string(),
            designation: "Consultant".to_string(),
            average_rating: 0.0,
            is_deleted: false,
            specialties: specialties.to_vec(),
            created_at: now,
            updated_at: now,
        };
        self.seed_account(email, Profile::Doctor(doctor.clone()));
        doctor
    }

    pub fn add_patient(&self, name: &str) -> Patient {
        let now = Utc::now();
        let email = format!("{}.{}@example.com", name.to_lowercase(), Uuid::new_v4().simple());
        let patient = Patient {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.clone(),
            profile_photo: None,
            contact_number: None,
            address: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.seed_account(email, Profile::Patient(patient.clone()));
        patient
    }

    fn seed_account(&self, email: String, profile: Profile) {
        let user = User::new(email, profile.role());
        self.transaction(|s| insert_account(s, &user, "hash", &profile))
            .unwrap();
    }

    /// A 30-minute slot starting at `hour` o'clock on a fixed future day
    pub fn add_schedule(&self, hour: u32) -> Schedule {
        let start = Utc
            .with_ymd_and_hms(2031, 1, 1, hour, 0, 0)
            .single()
            .unwrap();
        let schedule = Schedule::new(start, start + Duration::minutes(30));
        self.transaction(|s| {
            s.schedules.push(schedule.clone());
            Ok(())
        })
        .unwrap();
        schedule
    }

    pub fn link_schedule(&self, doctor_id: Uuid, schedule_id: Uuid) {
        self.transaction(|s| {
            s.doctor_schedules
                .push(DoctorSchedule::new(doctor_id, schedule_id));
            Ok(())
        })
        .unwrap();
    }

    /// Doctor, patient, assigned slot, and an unpaid appointment with payment
    pub fn add_booking(&self) -> (Appointment, Payment) {
        let doctor = self.add_doctor("Dr. Pay", &[]);
        let patient = self.add_patient("Payer");
        let hour = u32::try_from(self.read(|s| s.schedules.len()) % 24).unwrap();
        let slot = self.add_schedule(hour);
        self.link_schedule(doctor.id, slot.id);

        let appointment = Appointment::new(patient.id, doctor.id, slot.id);
        let payment = Payment::new(appointment.id, doctor.appointment_fee);
        self.transaction(|s| book(s, &appointment, &payment)).unwrap();
        (appointment, payment)
    }

    // === Inspection ===

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.read(|s| {
            s.users
                .iter()
                .find(|(u, _)| u.email == email)
                .map(|(u, _)| u.clone())
        })
    }

    pub fn password_hash(&self, user_id: Uuid) -> Option<String> {
        self.read(|s| {
            s.users
                .iter()
                .find(|(u, _)| u.id == user_id)
                .map(|(_, h)| h.clone())
        })
    }

    pub fn doctor(&self, id: Uuid) -> Option<Doctor> {
        self.read(|s| s.doctors.iter().find(|d| d.id == id).map(|d| s.hydrate(d)))
    }

    pub fn doctor_schedule(&self, doctor_id: Uuid, schedule_id: Uuid) -> Option<DoctorSchedule> {
        self.read(|s| {
            s.doctor_schedules
                .iter()
                .find(|l| l.doctor_id == doctor_id && l.schedule_id == schedule_id)
                .cloned()
        })
    }

    pub fn appointment(&self, id: Uuid) -> Option<Appointment> {
        self.read(|s| s.appointments.iter().find(|a| a.id == id).cloned())
    }

    pub fn appointment_count(&self) -> usize {
        self.read(|s| s.appointments.len())
    }

    pub fn payment(&self, id: Uuid) -> Option<Payment> {
        self.read(|s| s.payments.iter().find(|p| p.id == id).cloned())
    }
}

fn insert_account(
    s: &mut State,
    user: &User,
    password_hash: &str,
    profile: &Profile,
) -> RepoResult<()> {
    if s.users.iter().any(|(u, _)| u.email == user.email) {
        return Err(DomainError::EmailAlreadyExists);
    }
    s.users.push((user.clone(), password_hash.to_string()));

    if profile.email() != user.email {
        return Err(DomainError::ValidationError(
            "Profile has no matching user account".to_string(),
        ));
    }
    match profile {
        Profile::Patient(p) => s.patients.push(p.clone()),
        Profile::Admin(a) => s.admins.push(a.clone()),
        Profile::Doctor(d) => {
            let mut stored = d.clone();
            stored.specialties.clear();
            s.doctors.push(stored);
            for specialty in &d.specialties {
                s.link_specialty(d.id, specialty.id)?;
            }
        }
    }
    Ok(())
}

fn book(s: &mut State, appointment: &Appointment, payment: &Payment) -> RepoResult<()> {
    if s.appointments
        .iter()
        .any(|a| a.doctor_id == appointment.doctor_id && a.schedule_id == appointment.schedule_id)
    {
        return Err(DomainError::ScheduleAlreadyBooked);
    }
    let known = s.patients.iter().any(|p| p.id == appointment.patient_id)
        && s.doctors.iter().any(|d| d.id == appointment.doctor_id)
        && s.schedules.iter().any(|x| x.id == appointment.schedule_id);
    if !known {
        return Err(DomainError::ValidationError(
            "Patient, doctor or schedule does not exist".into(),
        ));
    }
    s.appointments.push(appointment.clone());

    let link = s
        .doctor_schedules
        .iter_mut()
        .find(|l| l.doctor_id == appointment.doctor_id && l.schedule_id == appointment.schedule_id)
        .ok_or(DomainError::DoctorScheduleNotFound)?;
    if link.is_booked {
        return Err(DomainError::ScheduleAlreadyBooked);
    }
    link.is_booked = true;
    link.appointment_id = Some(appointment.id);

    s.payments.push(payment.clone());
    Ok(())
}

// ============================================================================
// Repository implementations
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.read(|s| s.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone())))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.user_by_email(email))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.user_by_email(email).is_some())
    }

    async fn create_with_profile(
        &self,
        user: &User,
        password_hash: &str,
        profile: &Profile,
    ) -> RepoResult<()> {
        let fail = self.inner.fail_profile_insert.swap(false, Ordering::SeqCst);
        self.transaction(|s| {
            if fail {
                s.users.push((user.clone(), password_hash.to_string()));
                return Err(DomainError::DatabaseError("profile insert failed".into()));
            }
            insert_account(s, user, password_hash, profile)
        })
    }

    async fn find_many(&self, predicate: &Predicate, page: &PageRequest) -> RepoResult<Vec<User>> {
        let rows = self.read(|s| {
            s.users
                .iter()
                .map(|(u, _)| u)
                .filter(|u| predicate.matches(*u))
                .cloned()
                .collect()
        });
        Ok(paged(rows, page, |u: &User| u.created_at))
    }

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        Ok(self.read(|s| s.users.iter().filter(|(u, _)| predicate.matches(u)).count()) as i64)
    }

    async fn update_status(&self, id: Uuid, status: UserStatus) -> RepoResult<User> {
        self.transaction(|s| {
            let (user, _) = s
                .users
                .iter_mut()
                .find(|(u, _)| u.id == id)
                .ok_or(DomainError::UserNotFound(id))?;
            user.status = status;
            Ok(user.clone())
        })
    }
}

#[async_trait]
impl DoctorRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Doctor>> {
        Ok(self.doctor(id))
    }

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Doctor>> {
        let rows = self.read(|s| {
            s.doctors
                .iter()
                .map(|d| s.hydrate(d))
                .filter(|d| predicate.matches(d))
                .collect()
        });
        Ok(paged(rows, page, |d: &Doctor| d.created_at))
    }

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        Ok(self.read(|s| {
            s.doctors
                .iter()
                .filter(|d| predicate.matches(&s.hydrate(d)))
                .count()
        }) as i64)
    }

    async fn update_with_specialties(
        &self,
        id: Uuid,
        patch: &DoctorPatch,
        directives: &[SpecialtyDirective],
    ) -> RepoResult<Doctor> {
        self.transaction(|s| {
            if !s.doctors.iter().any(|d| d.id == id && !d.is_deleted) {
                return Err(DomainError::DoctorNotFound(id));
            }
            let (removed, added) = SpecialtyDirective::partition(directives);
            s.doctor_specialties
                .retain(|(d, sp)| !(*d == id && removed.contains(sp)));
            for specialty_id in added {
                s.link_specialty(id, specialty_id)?;
            }
            let doctor = s
                .doctors
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or(DomainError::DoctorNotFound(id))?;
            patch.apply_to(doctor);
            let doctor = doctor.clone();
            Ok(s.hydrate(&doctor))
        })
    }

    async fn soft_delete(&self, id: Uuid) -> RepoResult<Doctor> {
        self.transaction(|s| {
            let doctor = s
                .doctors
                .iter_mut()
                .find(|d| d.id == id && !d.is_deleted)
                .ok_or(DomainError::DoctorNotFound(id))?;
            doctor.is_deleted = true;
            let doctor = doctor.clone();
            s.set_user_status(&doctor.email, UserStatus::Deleted);
            Ok(s.hydrate(&doctor))
        })
    }
}

#[async_trait]
impl PatientRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Patient>> {
        Ok(self.read(|s| s.patients.iter().find(|p| p.id == id).cloned()))
    }

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Patient>> {
        let rows = self.read(|s| {
            s.patients
                .iter()
                .filter(|p| predicate.matches(*p))
                .cloned()
                .collect()
        });
        Ok(paged(rows, page, |p: &Patient| p.created_at))
    }

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        Ok(self.read(|s| s.patients.iter().filter(|p| predicate.matches(*p)).count()) as i64)
    }

    async fn soft_delete(&self, id: Uuid) -> RepoResult<Patient> {
        self.transaction(|s| {
            let patient = s
                .patients
                .iter_mut()
                .find(|p| p.id == id && !p.is_deleted)
                .ok_or(DomainError::PatientNotFound(id))?;
            patient.is_deleted = true;
            let patient = patient.clone();
            s.set_user_status(&patient.email, UserStatus::Deleted);
            Ok(patient)
        })
    }
}

#[async_trait]
impl SpecialtyRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Specialty>> {
        Ok(self.read(|s| s.specialties.iter().find(|sp| sp.id == id).cloned()))
    }

    async fn create(&self, specialty: &Specialty) -> RepoResult<()> {
        self.transaction(|s| {
            if s.specialties.iter().any(|sp| sp.title == specialty.title) {
                return Err(DomainError::SpecialtyAlreadyExists);
            }
            s.specialties.push(specialty.clone());
            Ok(())
        })
    }

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Specialty>> {
        let rows = self.read(|s| {
            s.specialties
                .iter()
                .filter(|sp| predicate.matches(*sp))
                .cloned()
                .collect()
        });
        Ok(paged(rows, page, |sp: &Specialty| sp.created_at))
    }

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        Ok(self.read(|s| s.specialties.iter().filter(|sp| predicate.matches(*sp)).count()) as i64)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.transaction(|s| {
            s.doctor_specialties.retain(|(_, sp)| *sp != id);
            let before = s.specialties.len();
            s.specialties.retain(|sp| sp.id != id);
            if s.specialties.len() == before {
                return Err(DomainError::SpecialtyNotFound(id));
            }
            Ok(())
        })
    }
}

#[async_trait]
impl ScheduleRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Schedule>> {
        Ok(self.read(|s| s.schedules.iter().find(|x| x.id == id).cloned()))
    }

    async fn create_many(&self, schedules: &[Schedule]) -> RepoResult<Vec<Schedule>> {
        self.transaction(|s| {
            let mut created = Vec::new();
            for schedule in schedules {
                let exists = s.schedules.iter().any(|x| {
                    x.start_date_time == schedule.start_date_time
                        && x.end_date_time == schedule.end_date_time
                });
                if !exists {
                    s.schedules.push(schedule.clone());
                    created.push(schedule.clone());
                }
            }
            Ok(created)
        })
    }

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Schedule>> {
        let rows = self.read(|s| {
            s.schedules
                .iter()
                .filter(|schedule| {
                    predicate.matches(&ScheduleView {
                        schedule,
                        links: &s.doctor_schedules,
                    })
                })
                .cloned()
                .collect()
        });
        Ok(paged(rows, page, |x: &Schedule| x.created_at))
    }

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        Ok(self.read(|s| {
            s.schedules
                .iter()
                .filter(|schedule| {
                    predicate.matches(&ScheduleView {
                        schedule,
                        links: &s.doctor_schedules,
                    })
                })
                .count()
        }) as i64)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.transaction(|s| {
            if !s.schedules.iter().any(|x| x.id == id) {
                return Err(DomainError::ScheduleNotFound(id));
            }
            if s.appointments.iter().any(|a| a.schedule_id == id) {
                return Err(DomainError::ScheduleAlreadyBooked);
            }
            s.schedules.retain(|x| x.id != id);
            s.doctor_schedules.retain(|l| l.schedule_id != id);
            Ok(())
        })
    }
}

#[async_trait]
impl DoctorScheduleRepository for MemoryStore {
    async fn find(
        &self,
        doctor_id: Uuid,
        schedule_id: Uuid,
    ) -> RepoResult<Option<DoctorSchedule>> {
        Ok(self.doctor_schedule(doctor_id, schedule_id))
    }

    async fn assign(
        &self,
        doctor_id: Uuid,
        schedule_ids: &[Uuid],
    ) -> RepoResult<Vec<DoctorSchedule>> {
        self.transaction(|s| {
            if !s.doctors.iter().any(|d| d.id == doctor_id && !d.is_deleted) {
                return Err(DomainError::DoctorNotFound(doctor_id));
            }
            let mut links = Vec::with_capacity(schedule_ids.len());
            for &schedule_id in schedule_ids {
                if !s.schedules.iter().any(|x| x.id == schedule_id) {
                    return Err(DomainError::ScheduleNotFound(schedule_id));
                }
                if s.doctor_schedules
                    .iter()
                    .any(|l| l.doctor_id == doctor_id && l.schedule_id == schedule_id)
                {
                    return Err(DomainError::ScheduleAlreadyAssigned);
                }
                let link = DoctorSchedule::new(doctor_id, schedule_id);
                s.doctor_schedules.push(link.clone());
                links.push(link);
            }
            Ok(links)
        })
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Appointment>> {
        Ok(self.appointment(id))
    }

    async fn create_with_payment(
        &self,
        appointment: &Appointment,
        payment: &Payment,
    ) -> RepoResult<()> {
        self.transaction(|s| book(s, appointment, payment))
    }

    async fn find_many(
        &self,
        predicate: &Predicate,
        page: &PageRequest,
    ) -> RepoResult<Vec<Appointment>> {
        let rows = self.read(|s| {
            s.appointments
                .iter()
                .filter(|a| predicate.matches(*a))
                .cloned()
                .collect()
        });
        Ok(paged(rows, page, |a: &Appointment| a.created_at))
    }

    async fn count(&self, predicate: &Predicate) -> RepoResult<i64> {
        Ok(self.read(|s| s.appointments.iter().filter(|a| predicate.matches(*a)).count()) as i64)
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Payment>> {
        Ok(self.payment(id))
    }

    async fn find_by_appointment(&self, appointment_id: Uuid) -> RepoResult<Option<Payment>> {
        Ok(self.read(|s| {
            s.payments
                .iter()
                .find(|p| p.appointment_id == appointment_id)
                .cloned()
        }))
    }

    async fn settle_checkout(&self, settlement: &CheckoutSettlement) -> RepoResult<()> {
        self.transaction(|s| {
            if let Some(id) = settlement.appointment_id {
                let appointment = s
                    .appointments
                    .iter_mut()
                    .find(|a| a.id == id)
                    .ok_or(DomainError::AppointmentNotFound(id))?;
                appointment.payment_status =
                    appointment.payment_status.transition(settlement.status);
            }
            if let Some(id) = settlement.payment_id {
                let payment = s
                    .payments
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(DomainError::PaymentNotFound(id))?;
                payment.status = payment.status.transition(settlement.status);
                if settlement.gateway_data.is_some() {
                    payment.payment_gateway_data.clone_from(&settlement.gateway_data);
                }
            }
            Ok(())
        })
    }
}

#[async_trait]
impl FileStorage for MemoryStore {
    async fn upload(&self, file: UploadedFile) -> Result<String, DomainError> {
        if self.inner.fail_uploads.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("upload rejected".into()));
        }
        let url = format!("memory://{}", file.file_name);
        self.inner.uploads.lock().unwrap().push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), DomainError> {
        let mut uploads = self.inner.uploads.lock().unwrap();
        if let Some(pos) = uploads.iter().position(|u| u == url) {
            uploads.remove(pos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_transaction_leaves_state_untouched() {
        let store = MemoryStore::new();
        let result: RepoResult<()> = store.transaction(|s| {
            s.specialties.push(Specialty::new("Temp".into(), None));
            Err(DomainError::InternalError("boom".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.read(|s| s.specialties.len()), 0);
    }
}
