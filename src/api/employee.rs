use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::debug;

use crate::db::Store;
use crate::error::ApiError;
use crate::model::employee::{CreateEmployee, EmployeeResponse};
use crate::repo::employee::EmployeeRepo;

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error", body = Object, example = json!({
            "detail": "Invalid email format"
        })),
        (status = 409, description = "Duplicate employee ID or email", body = Object, example = json!({
            "detail": "Employee with ID 'E001' already exists"
        }))
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    store: web::Data<Store>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let created = EmployeeRepo::new(&store).create(&payload).await?;
    debug!(employee_id = %created.employee_id, "employee created");

    Ok(HttpResponse::Created().json(created))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [EmployeeResponse])
    ),
    tag = "Employees"
)]
pub async fn list_employees(store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let employees = EmployeeRepo::new(&store).list().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee 'E001' not found"
        }))
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let employee = EmployeeRepo::new(&store).get(&employee_id).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee (cascades to attendance records)
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Employee 'E001' deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee 'E001' not found"
        }))
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    EmployeeRepo::new(&store).delete(&employee_id).await?;
    debug!(employee_id = %employee_id, "employee deleted with attendance cascade");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Employee '{employee_id}' deleted successfully")
    })))
}
