//! Employee Entity
//!
//! Current state of an employee as held by the relational store.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee row. `id` is assigned by the store and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub salary: Decimal,
    pub department: String,
    #[serde(with = "admission_date")]
    #[schema(value_type = String, example = "2024-01-01T00:00:00")]
    pub admission_date: NaiveDateTime,
}

/// The mutable part of an employee, as accepted by create and update.
///
/// Missing fields fall back to empty strings, zero salary and the epoch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeData {
    pub name: String,
    pub address: String,
    pub salary: Decimal,
    pub department: String,
    #[serde(with = "admission_date")]
    #[schema(value_type = String, example = "2024-01-01")]
    pub admission_date: NaiveDateTime,
}

impl Employee {
    pub fn from_data(id: i32, data: EmployeeData) -> Self {
        Self {
            id,
            name: data.name,
            address: data.address,
            salary: salary::normalize(data.salary),
            department: data.department,
            admission_date: data.admission_date,
        }
    }

    /// Full replace of every mutable field; `id` is untouched.
    pub fn apply(&mut self, data: EmployeeData) {
        self.name = data.name;
        self.address = data.address;
        self.salary = salary::normalize(data.salary);
        self.department = data.department;
        self.admission_date = data.admission_date;
    }

    pub fn data(&self) -> EmployeeData {
        EmployeeData {
            name: self.name.clone(),
            address: self.address.clone(),
            salary: self.salary,
            department: self.department.clone(),
            admission_date: self.admission_date,
        }
    }
}

/// Salary precision shared by every backend.
pub mod salary {
    use rust_decimal::{Decimal, RoundingStrategy};

    /// Digits kept after the decimal point, as in a `NUMERIC(18, 2)` column
    pub const SCALE: u32 = 2;

    /// Round to [`SCALE`] digits, halves away from zero.
    pub fn normalize(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Lenient admission date (de)serialization.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp or a bare
/// `YYYY-MM-DD` date. Always writes the naive timestamp form.
///
/// An RFC 3339 value with an offset is converted to UTC and the offset is
/// dropped, so `2024-01-01T00:00:00-03:00` reads back as `2024-01-01T03:00:00`.
pub mod admission_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid admission date: {raw}")))
    }

    pub fn format(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, FORMAT) {
            return Some(dt);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}
