use crate::api::attendance::{AttendanceQuery, AttendanceRecord, SetStatus};
use crate::api::shift::{BoardRow, BoardShift, CreateShift, WeekBoardResponse, WeekQuery};
use crate::api::staff::{CreateStaff, StaffQuery, UpdateStaff};
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::shift::ShiftType;
use crate::model::staff::{Staff, StaffRole};
use crate::models::{LoginReqDto, RegisterReq};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hospital Shift Manager API",
        version = "1.0.0",
        description = r#"
## Hospital Shift Manager

Backend for a hospital staff/shift/attendance dashboard.

### 🔹 Key Features
- **Staff Directory**
  - List, add, update and remove staff members
- **Shift Board**
  - Week view (3 shift rows x 7 days) and shift assignment
- **Attendance**
  - Per-date attendance records and status updates

### 🔐 Security
All data endpoints require **JWT Bearer authentication**; accounts are
email/password with refresh-token sessions.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::staff::list_staff,
        crate::api::staff::create_staff,
        crate::api::staff::update_staff,
        crate::api::staff::delete_staff,

        crate::api::shift::week_board,
        crate::api::shift::create_shift,

        crate::api::attendance::list_attendance,
        crate::api::attendance::set_status
    ),
    components(
        schemas(
            RegisterReq,
            LoginReqDto,
            Staff,
            StaffRole,
            CreateStaff,
            UpdateStaff,
            StaffQuery,
            ShiftType,
            CreateShift,
            WeekQuery,
            BoardShift,
            BoardRow,
            WeekBoardResponse,
            Attendance,
            AttendanceStatus,
            AttendanceQuery,
            AttendanceRecord,
            SetStatus
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Account and session APIs"),
        (name = "Staff", description = "Staff directory APIs"),
        (name = "Shifts", description = "Shift board APIs"),
        (name = "Attendance", description = "Attendance tracking APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
