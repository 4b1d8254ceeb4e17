use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::model::employee::EmployeeDoc;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Attendance document as persisted in the `attendance` collection. The
/// employee's name is never stored; it is joined in at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub employee_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

impl MarkAttendance {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.employee_id.trim().is_empty() {
            return Err(ApiError::Validation("employee_id cannot be empty".into()));
        }
        if !is_valid_date(&self.date) {
            return Err(ApiError::Validation(
                "date must be in YYYY-MM-DD format".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Filter by date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Filter by employee ID
    pub employee_id: Option<String>,
}

impl AttendanceQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(date) = &self.date {
            if !is_valid_date(date) {
                return Err(ApiError::Validation(
                    "date must be in YYYY-MM-DD format".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = "665f1f77bcf86cd799439012")]
    pub id: String,
    #[schema(example = "E001")]
    pub employee_id: String,
    /// Null when the referenced employee has since been deleted.
    #[schema(example = "John Doe")]
    pub employee_name: Option<String>,
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl AttendanceResponse {
    pub fn from_doc(doc: AttendanceDoc, employee_name: Option<String>) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            employee_id: doc.employee_id,
            employee_name,
            date: doc.date,
            status: doc.status,
            created_at: doc.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodaySummary {
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = 10)]
    pub total_employees: u64,
    #[schema(example = 6)]
    pub present: u64,
    #[schema(example = 2)]
    pub absent: u64,
    /// Best-effort: the three counts are separate queries, so concurrent
    /// marking can transiently drive this negative. Not clamped.
    #[schema(example = 2)]
    pub not_marked: i64,
}

impl TodaySummary {
    pub fn new(date: String, total_employees: u64, present: u64, absent: u64) -> Self {
        Self {
            date,
            total_employees,
            present,
            absent,
            not_marked: total_employees as i64 - present as i64 - absent as i64,
        }
    }
}

/// Strict `YYYY-MM-DD`: zero-padded and a real calendar date.
pub fn is_valid_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Builds the employee_id -> full_name join map used to shape listings.
pub fn name_index(employees: &[EmployeeDoc]) -> HashMap<String, String> {
    employees
        .iter()
        .map(|emp| (emp.employee_id.clone(), emp.full_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn employee(employee_id: &str, full_name: &str) -> EmployeeDoc {
        EmployeeDoc {
            id: Some(ObjectId::new()),
            employee_id: employee_id.into(),
            full_name: full_name.into(),
            email: format!("{employee_id}@company.com"),
            department: "Engineering".into(),
            created_at: Utc::now(),
        }
    }

    fn record(employee_id: &str, date: &str) -> AttendanceDoc {
        AttendanceDoc {
            id: Some(ObjectId::new()),
            employee_id: employee_id.into(),
            date: date.into(),
            status: AttendanceStatus::Present,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn date_shape_is_strict() {
        assert!(is_valid_date("2024-01-01"));
        assert!(is_valid_date("1999-12-31"));

        assert!(!is_valid_date(""));
        assert!(!is_valid_date("2024-1-1"));
        assert!(!is_valid_date("01-01-2024"));
        assert!(!is_valid_date("2024/01/01"));
        assert!(!is_valid_date("2024-13-01"));
        assert!(!is_valid_date("2024-02-30"));
        assert!(!is_valid_date("2024-01-01T00:00"));
    }

    #[test]
    fn mark_payload_validation() {
        let mut req = MarkAttendance {
            employee_id: "E001".into(),
            date: "2024-01-01".into(),
            status: AttendanceStatus::Absent,
        };
        assert!(req.validate().is_ok());

        req.date = "2024-1-1".into();
        assert!(req.validate().is_err());

        req.date = "2024-01-01".into();
        req.employee_id = " ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn query_date_filter_is_validated() {
        let query = AttendanceQuery {
            date: Some("not-a-date".into()),
            employee_id: None,
        };
        assert!(query.validate().is_err());

        let query = AttendanceQuery {
            date: None,
            employee_id: Some("E001".into()),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn status_round_trips_as_exact_strings() {
        assert_eq!(AttendanceStatus::Present.to_string(), "Present");
        assert_eq!(
            AttendanceStatus::from_str("Absent").unwrap(),
            AttendanceStatus::Absent
        );
        assert!(AttendanceStatus::from_str("present").is_err());

        let json = serde_json::to_string(&AttendanceStatus::Present).unwrap();
        assert_eq!(json, "\"Present\"");
        assert!(serde_json::from_str::<AttendanceStatus>("\"Late\"").is_err());
    }

    #[test]
    fn name_join_resolves_known_ids_and_leaves_deleted_null() {
        let employees = vec![employee("E001", "John Doe"), employee("E002", "Jane Roe")];
        let names = name_index(&employees);

        let shaped = AttendanceResponse::from_doc(
            record("E001", "2024-01-01"),
            names.get("E001").cloned(),
        );
        assert_eq!(shaped.employee_name.as_deref(), Some("John Doe"));

        // Record whose employee has since been deleted.
        let orphan = AttendanceResponse::from_doc(
            record("E999", "2024-01-01"),
            names.get("E999").cloned(),
        );
        assert_eq!(orphan.employee_name, None);
    }

    #[test]
    fn summary_arithmetic() {
        let summary = TodaySummary::new("2024-01-01".into(), 10, 6, 2);
        assert_eq!(summary.not_marked, 2);

        // Not clamped: a double-marking race can drive it negative.
        let racy = TodaySummary::new("2024-01-01".into(), 1, 1, 1);
        assert_eq!(racy.not_marked, -1);
    }
}
