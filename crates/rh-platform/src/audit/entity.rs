//! Audit Log Entity
//!
//! One entry per successful employee mutation. Entries are grouped by the
//! employee id (partition key) and keyed inside the partition by a random
//! UUID (row key), so two entries never collide.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::employee::entity::{admission_date, Employee};

/// Kind of mutation recorded by an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AuditAction {
    Insertion,
    Update,
    Removal,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insertion => "Insertion",
            Self::Update => "Update",
            Self::Removal => "Removal",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit log entry with a snapshot of the employee at the time of the action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Row key: fresh UUID v4 per entry
    #[serde(rename = "_id")]
    pub row_key: String,

    /// Employee id in string form
    pub partition_key: String,

    pub action: AuditAction,

    // Snapshot
    pub employee_id: i32,
    pub name: String,
    pub address: String,
    pub salary: Decimal,
    pub department: String,
    #[serde(with = "admission_date")]
    pub admission_date: NaiveDateTime,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(employee: &Employee, action: AuditAction) -> Self {
        Self {
            row_key: Uuid::new_v4().to_string(),
            partition_key: Self::partition_for(employee.id),
            action,
            employee_id: employee.id,
            name: employee.name.clone(),
            address: employee.address.clone(),
            salary: employee.salary,
            department: employee.department.clone(),
            admission_date: employee.admission_date,
            timestamp: Utc::now(),
        }
    }

    /// Partition key for an employee id
    pub fn partition_for(employee_id: i32) -> String {
        employee_id.to_string()
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The employee as it looked when the entry was written
    pub fn snapshot(&self) -> Employee {
        Employee {
            id: self.employee_id,
            name: self.name.clone(),
            address: self.address.clone(),
            salary: self.salary,
            department: self.department.clone(),
            admission_date: self.admission_date,
        }
    }
}
