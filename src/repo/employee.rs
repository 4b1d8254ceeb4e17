use chrono::Utc;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;

use crate::db::Store;
use crate::error::{ApiError, is_duplicate_key};
use crate::model::attendance::AttendanceDoc;
use crate::model::employee::{CreateEmployee, EmployeeDoc, EmployeeResponse};

/// CRUD over employee documents. Uniqueness of `employee_id` and `email` is
/// pre-checked for friendly messages and enforced by the unique indexes.
pub struct EmployeeRepo {
    employees: Collection<EmployeeDoc>,
    attendance: Collection<AttendanceDoc>,
}

impl EmployeeRepo {
    pub fn new(store: &Store) -> Self {
        Self {
            employees: store.employees(),
            attendance: store.attendance(),
        }
    }

    pub async fn create(&self, req: &CreateEmployee) -> Result<EmployeeResponse, ApiError> {
        let existing = self
            .employees
            .find_one(doc! { "employee_id": &req.employee_id })
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict(format!(
                "Employee with ID '{}' already exists",
                req.employee_id
            )));
        }

        let existing_email = self.employees.find_one(doc! { "email": &req.email }).await?;
        if existing_email.is_some() {
            return Err(ApiError::Conflict(format!(
                "Employee with email '{}' already exists",
                req.email
            )));
        }

        let mut employee = EmployeeDoc {
            id: None,
            employee_id: req.employee_id.clone(),
            full_name: req.full_name.clone(),
            email: req.email.clone(),
            department: req.department.clone(),
            created_at: Utc::now(),
        };

        // A concurrent create can slip in between the pre-checks and this
        // insert; the unique index settles it.
        let inserted = match self.employees.insert_one(&employee).await {
            Ok(result) => result,
            Err(err) if is_duplicate_key(&err) => {
                return Err(ApiError::Conflict(format!(
                    "Employee with ID '{}' or email '{}' already exists",
                    req.employee_id, req.email
                )));
            }
            Err(err) => return Err(err.into()),
        };
        employee.id = inserted.inserted_id.as_object_id();

        Ok(EmployeeResponse::from(employee))
    }

    /// All employees, most recently created first.
    pub async fn list(&self) -> Result<Vec<EmployeeResponse>, ApiError> {
        let employees: Vec<EmployeeDoc> = self
            .employees
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(employees.into_iter().map(EmployeeResponse::from).collect())
    }

    pub async fn get(&self, employee_id: &str) -> Result<EmployeeResponse, ApiError> {
        let employee = self
            .employees
            .find_one(doc! { "employee_id": employee_id })
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Employee '{employee_id}' not found"))
            })?;

        Ok(EmployeeResponse::from(employee))
    }

    /// Deletes the employee, then cascades to its attendance records as a
    /// second store operation. Not atomic: a crash between the two leaves
    /// orphaned attendance records behind.
    pub async fn delete(&self, employee_id: &str) -> Result<(), ApiError> {
        let result = self
            .employees
            .delete_one(doc! { "employee_id": employee_id })
            .await?;
        if result.deleted_count == 0 {
            return Err(ApiError::NotFound(format!(
                "Employee '{employee_id}' not found"
            )));
        }

        self.attendance
            .delete_many(doc! { "employee_id": employee_id })
            .await?;

        Ok(())
    }
}
