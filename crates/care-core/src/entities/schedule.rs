//! Schedule slots and their assignment to doctors

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query::{FilterValue, Matchable};

/// A bookable time slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: Uuid,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(start_date_time: DateTime<Utc>, end_date_time: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            start_date_time,
            end_date_time,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Link between a doctor and a schedule slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorSchedule {
    pub doctor_id: Uuid,
    pub schedule_id: Uuid,
    pub is_booked: bool,
    pub appointment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl DoctorSchedule {
    pub fn new(doctor_id: Uuid, schedule_id: Uuid) -> Self {
        Self {
            doctor_id,
            schedule_id,
            is_booked: false,
            appointment_id: None,
            created_at: Utc::now(),
        }
    }
}

impl Matchable for Schedule {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => Some(FilterValue::Uuid(self.id)),
            "start_date_time" => Some(FilterValue::Timestamp(self.start_date_time)),
            "end_date_time" => Some(FilterValue::Timestamp(self.end_date_time)),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}

impl Matchable for DoctorSchedule {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            "doctor_id" => Some(FilterValue::Uuid(self.doctor_id)),
            "schedule_id" => Some(FilterValue::Uuid(self.schedule_id)),
            "is_booked" => Some(FilterValue::Bool(self.is_booked)),
            _ => None,
        }
    }
}
