use chrono::Utc;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;

use crate::db::Store;
use crate::error::{ApiError, is_duplicate_key};
use crate::model::attendance::{
    AttendanceDoc, AttendanceQuery, AttendanceResponse, AttendanceStatus, MarkAttendance,
    TodaySummary, name_index,
};
use crate::model::employee::EmployeeDoc;

/// Attendance marking and listing. One record per employee per day, enforced
/// by a pre-check plus the compound unique index.
pub struct AttendanceRepo {
    employees: Collection<EmployeeDoc>,
    attendance: Collection<AttendanceDoc>,
}

impl AttendanceRepo {
    pub fn new(store: &Store) -> Self {
        Self {
            employees: store.employees(),
            attendance: store.attendance(),
        }
    }

    /// Existence check first, then the duplicate check: a missing employee is
    /// NotFound even when a duplicate would also apply.
    pub async fn mark(&self, req: &MarkAttendance) -> Result<AttendanceResponse, ApiError> {
        let employee = self
            .employees
            .find_one(doc! { "employee_id": &req.employee_id })
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Employee '{}' not found", req.employee_id))
            })?;

        let existing = self
            .attendance
            .find_one(doc! { "employee_id": &req.employee_id, "date": &req.date })
            .await?;
        if existing.is_some() {
            return Err(duplicate_mark(&req.employee_id, &req.date));
        }

        let mut record = AttendanceDoc {
            id: None,
            employee_id: req.employee_id.clone(),
            date: req.date.clone(),
            status: req.status,
            created_at: Utc::now(),
        };

        let inserted = match self.attendance.insert_one(&record).await {
            Ok(result) => result,
            Err(err) if is_duplicate_key(&err) => {
                return Err(duplicate_mark(&req.employee_id, &req.date));
            }
            Err(err) => return Err(err.into()),
        };
        record.id = inserted.inserted_id.as_object_id();

        // Name taken from the existence-check read, not stored.
        Ok(AttendanceResponse::from_doc(record, Some(employee.full_name)))
    }

    /// Records matching the filter conjunction, newest date first. Names are
    /// joined against the current employee set; a deleted employee yields a
    /// null name.
    pub async fn list(&self, query: &AttendanceQuery) -> Result<Vec<AttendanceResponse>, ApiError> {
        let mut filter = doc! {};
        if let Some(date) = &query.date {
            filter.insert("date", date);
        }
        if let Some(employee_id) = &query.employee_id {
            filter.insert("employee_id", employee_id);
        }

        let employees: Vec<EmployeeDoc> =
            self.employees.find(doc! {}).await?.try_collect().await?;
        let names = name_index(&employees);

        let records: Vec<AttendanceDoc> = self
            .attendance
            .find(filter)
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let name = names.get(&record.employee_id).cloned();
                AttendanceResponse::from_doc(record, name)
            })
            .collect())
    }

    pub async fn list_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceResponse>, ApiError> {
        let employee = self
            .employees
            .find_one(doc! { "employee_id": employee_id })
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Employee '{employee_id}' not found"))
            })?;

        let records: Vec<AttendanceDoc> = self
            .attendance
            .find(doc! { "employee_id": employee_id })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(records
            .into_iter()
            .map(|record| {
                AttendanceResponse::from_doc(record, Some(employee.full_name.clone()))
            })
            .collect())
    }

    /// Today's counts as three independent queries; best-effort, not an
    /// atomic snapshot.
    pub async fn today_summary(&self) -> Result<TodaySummary, ApiError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();

        let total_employees = self.employees.count_documents(doc! {}).await?;
        let present = self
            .attendance
            .count_documents(
                doc! { "date": &today, "status": AttendanceStatus::Present.to_string() },
            )
            .await?;
        let absent = self
            .attendance
            .count_documents(
                doc! { "date": &today, "status": AttendanceStatus::Absent.to_string() },
            )
            .await?;

        Ok(TodaySummary::new(today, total_employees, present, absent))
    }
}

fn duplicate_mark(employee_id: &str, date: &str) -> ApiError {
    ApiError::Conflict(format!(
        "Attendance already marked for employee '{employee_id}' on {date}"
    ))
}
