use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// Employee document as persisted in the `employees` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

impl CreateEmployee {
    /// Rejects malformed input before any store access. Reports the first
    /// offending field, in declaration order.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.employee_id.trim().is_empty() {
            return Err(ApiError::Validation("employee_id cannot be empty".into()));
        }
        if self.full_name.trim().is_empty() {
            return Err(ApiError::Validation("full_name cannot be empty".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("Invalid email format".into()));
        }
        if self.department.trim().is_empty() {
            return Err(ApiError::Validation("department cannot be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = "665f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "E001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    pub created_at: DateTime<Utc>,
}

impl From<EmployeeDoc> for EmployeeResponse {
    fn from(doc: EmployeeDoc) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            employee_id: doc.employee_id,
            full_name: doc.full_name,
            email: doc.email,
            department: doc.department,
            created_at: doc.created_at,
        }
    }
}

/// Minimal syntactic email check: one `@`, non-empty local part, domain with
/// at least one interior dot, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateEmployee {
        CreateEmployee {
            employee_id: "E001".into(),
            full_name: "John Doe".into(),
            email: "john.doe@company.com".into(),
            department: "Engineering".into(),
        }
    }

    #[test]
    fn accepts_well_formed_payload() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn rejects_empty_fields_first_offender_wins() {
        let mut req = payload();
        req.employee_id = "   ".into();
        req.full_name = "".into();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "employee_id cannot be empty");
    }

    #[test]
    fn rejects_empty_department() {
        let mut req = payload();
        req.department = "".into();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "department cannot be empty");
    }

    #[test]
    fn email_syntax() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@missing-local.com"));
        assert!(!is_valid_email("missing-domain@"));
        assert!(!is_valid_email("no-dot@domain"));
        assert!(!is_valid_email("dot-at-end@domain."));
        assert!(!is_valid_email(".leading@.domain.com"));
        assert!(!is_valid_email("two@@signs.com"));
        assert!(!is_valid_email("white space@domain.com"));
    }

    #[test]
    fn invalid_email_is_a_validation_error() {
        let mut req = payload();
        req.email = "not-an-email".into();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn response_shaping_carries_object_id_as_hex() {
        let oid = ObjectId::new();
        let doc = EmployeeDoc {
            id: Some(oid),
            employee_id: "E001".into(),
            full_name: "John Doe".into(),
            email: "john.doe@company.com".into(),
            department: "Engineering".into(),
            created_at: Utc::now(),
        };
        let shaped = EmployeeResponse::from(doc);
        assert_eq!(shaped.id, oid.to_hex());
        assert_eq!(shaped.employee_id, "E001");
    }
}
