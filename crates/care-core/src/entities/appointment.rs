//! Appointment and payment entities

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::query::{FilterValue, Matchable};

/// Lifecycle of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Inprogress,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Inprogress => "INPROGRESS",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(Self::Scheduled),
            "INPROGRESS" => Ok(Self::Inprogress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(DomainError::InvalidEnumValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Payment state shared by appointments and payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
        }
    }

    /// Status reported by a checkout session's `payment_status` field
    pub fn from_checkout(payment_status: &str) -> Self {
        if payment_status == "paid" {
            Self::Paid
        } else {
            Self::Unpaid
        }
    }

    /// Next stored status when `incoming` is reported. PAID is terminal.
    #[must_use]
    pub fn transition(self, incoming: Self) -> Self {
        match self {
            Self::Paid => Self::Paid,
            Self::Unpaid => incoming,
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(Self::Paid),
            "UNPAID" => Ok(Self::Unpaid),
            other => Err(DomainError::InvalidEnumValue {
                field: "paymentStatus",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment between a patient and a doctor for one schedule slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub schedule_id: Uuid,
    pub video_calling_id: String,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(patient_id: Uuid, doctor_id: Uuid, schedule_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            schedule_id,
            video_calling_id: Uuid::new_v4().to_string(),
            status: AppointmentStatus::Scheduled,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payment record for one appointment
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub amount: i32,
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub payment_gateway_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(appointment_id: Uuid, amount: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            appointment_id,
            amount,
            transaction_id: Uuid::new_v4().simple().to_string(),
            status: PaymentStatus::Unpaid,
            payment_gateway_data: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Outcome of a completed checkout, applied to an appointment and its payment
/// as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSettlement {
    pub appointment_id: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub status: PaymentStatus,
    pub gateway_data: Option<serde_json::Value>,
}

impl CheckoutSettlement {
    /// Whether the settlement touches any record at all
    pub fn is_empty(&self) -> bool {
        self.appointment_id.is_none() && self.payment_id.is_none()
    }
}

impl Matchable for Appointment {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => Some(FilterValue::Uuid(self.id)),
            "patient_id" => Some(FilterValue::Uuid(self.patient_id)),
            "doctor_id" => Some(FilterValue::Uuid(self.doctor_id)),
            "status" => Some(FilterValue::Text(self.status.as_str().to_string())),
            "payment_status" => Some(FilterValue::Text(self.payment_status.as_str().to_string())),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}
