use crate::auth::auth::AuthUser;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::shift::ShiftType;
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    /// Shift date to list attendance for. Defaults to today.
    #[param(example = "2024-06-10")]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct SetStatus {
    #[schema(example = "late")]
    pub status: AttendanceStatus,
}

/// One attendance record joined through its shift to the staff member.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 42)]
    pub shift_id: u64,
    #[schema(example = "08:58:00", value_type = String, format = "time", nullable = true)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "17:05:00", value_type = String, format = "time", nullable = true)]
    pub check_out: Option<NaiveTime>,
    #[schema(example = "pending")]
    pub status: AttendanceStatus,
    #[schema(example = "morning")]
    pub shift_type: ShiftType,
    #[schema(example = "2024-06-10", format = "date", value_type = String)]
    pub shift_date: NaiveDate,
    #[schema(example = "Alice Rahman")]
    pub staff_name: String,
}

/// Attendance for all shifts on one date
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records for the date", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    debug!(date = %date, "Fetching attendance");

    let records = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT a.id, a.shift_id, a.check_in, a.check_out, a.status,
               s.shift_type, s.shift_date, st.name AS staff_name
        FROM attendance a
        INNER JOIN shifts s ON s.id = a.shift_id
        INNER JOIN staff st ON st.id = s.staff_id
        WHERE s.shift_date = ?
        ORDER BY st.name ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, date = %date, "Failed to fetch attendance");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Set an attendance record's status
///
/// Transitions are fully open: any status can be set from any other, and
/// check_in/check_out are never touched. The committed row is read back and
/// returned, so the caller renders exactly what the database holds.
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{attendance_id}/status",
    params(
        ("attendance_id", Path, description = "Attendance record ID")
    ),
    request_body = SetStatus,
    responses(
        (status = 200, description = "Updated record as committed", body = Attendance),
        (status = 404, description = "Attendance record not found"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn set_status(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<SetStatus>,
) -> actix_web::Result<impl Responder> {
    let attendance_id = path.into_inner();

    // Setting the same status twice is a no-op, and MySQL reports unchanged
    // rows as zero affected; existence comes from the read-back instead.
    sqlx::query(r#"UPDATE attendance SET status = ? WHERE id = ?"#)
        .bind(payload.status)
        .bind(attendance_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, attendance_id, "Failed to update attendance status");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let record = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, shift_id, check_in, check_out, status, created_at
        FROM attendance
        WHERE id = ?
        "#,
    )
    .bind(attendance_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, attendance_id, "Failed to re-read attendance record");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match record {
        Some(record) => {
            info!(
                operator = %auth.email,
                attendance_id,
                status = %payload.status,
                "Attendance status set"
            );
            Ok(HttpResponse::Ok().json(record))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Attendance record not found"
        }))),
    }
}
