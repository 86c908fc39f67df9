//! Specialty entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query::{FilterValue, Matchable};

/// Medical specialty a doctor can be linked to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specialty {
    pub id: Uuid,
    pub title: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Specialty {
    pub fn new(title: String, icon: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            icon,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Matchable for Specialty {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            "id" => Some(FilterValue::Uuid(self.id)),
            "title" => Some(FilterValue::Text(self.title.clone())),
            "created_at" => Some(FilterValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}
