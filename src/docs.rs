use crate::model::attendance::{
    AttendanceResponse, AttendanceStatus, MarkAttendance, TodaySummary,
};
use crate::model::employee::{CreateEmployee, EmployeeResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

Lightweight Human Resource Management System.

### Key Features
- **Employee Management**
  - Create, list, view, and delete employee records
- **Attendance Management**
  - Mark daily attendance and browse records by date or employee
- **Daily Summary**
  - Present / absent / not-marked counts for today

### Response Format
- JSON-based RESTful responses
- Client errors carry a single `detail` message

---
Built with **Rust**, **Actix Web**, **MongoDB**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::today_summary
    ),
    components(
        schemas(
            CreateEmployee,
            EmployeeResponse,
            MarkAttendance,
            AttendanceResponse,
            AttendanceStatus,
            TodaySummary
        )
    ),
    tags(
        (name = "Employees", description = "Employee record APIs"),
        (name = "Attendance", description = "Attendance marking and reporting APIs"),
    )
)]
pub struct ApiDoc;
