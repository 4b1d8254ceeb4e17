use actix_web::{HttpResponse, web};
use tracing::debug;

use crate::db::Store;
use crate::error::ApiError;
use crate::model::attendance::{
    AttendanceQuery, AttendanceResponse, MarkAttendance, TodaySummary,
};
use crate::repo::attendance::AttendanceRepo;

/// Mark Attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceResponse),
        (status = 400, description = "Validation error", body = Object, example = json!({
            "detail": "date must be in YYYY-MM-DD format"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee 'E001' not found"
        })),
        (status = 409, description = "Already marked for that date", body = Object, example = json!({
            "detail": "Attendance already marked for employee 'E001' on 2024-01-01"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    store: web::Data<Store>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let record = AttendanceRepo::new(&store).mark(&payload).await?;
    debug!(employee_id = %record.employee_id, date = %record.date, "attendance marked");

    Ok(HttpResponse::Created().json(record))
}

/// List Attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Matching records, newest date first", body = [AttendanceResponse]),
        (status = 400, description = "Malformed date filter", body = Object, example = json!({
            "detail": "date must be in YYYY-MM-DD format"
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    store: web::Data<Store>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let records = AttendanceRepo::new(&store).list(&query).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// List Attendance for one Employee
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "The employee's records, newest date first", body = [AttendanceResponse]),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee 'E001' not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let records = AttendanceRepo::new(&store)
        .list_for_employee(&employee_id)
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Today's Summary
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    responses(
        (status = 200, description = "Today's attendance counts", body = TodaySummary)
    ),
    tag = "Attendance"
)]
pub async fn today_summary(store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let summary = AttendanceRepo::new(&store).today_summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}
