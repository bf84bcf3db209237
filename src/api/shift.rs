use crate::model::{
    shift::ShiftType,
    staff::{Staff, StaffRole},
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use strum::IntoEnumIterator;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateShift {
    #[schema(example = 3)]
    pub staff_id: u64,
    #[schema(example = "2024-06-10", format = "date", value_type = String)]
    pub shift_date: NaiveDate,
    #[schema(example = "morning")]
    pub shift_type: ShiftType,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct WeekQuery {
    /// Anchor date; the board shows the week containing it. Defaults to today.
    #[param(example = "2024-06-10")]
    pub date: Option<NaiveDate>,
}

/// One shift joined with the name of the staff member working it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct BoardShift {
    #[schema(example = 12)]
    pub id: u64,
    #[schema(example = 3)]
    pub staff_id: u64,
    #[schema(example = "2024-06-10", format = "date", value_type = String)]
    pub shift_date: NaiveDate,
    #[schema(example = "morning")]
    pub shift_type: ShiftType,
    #[schema(example = "Bob Chowdhury")]
    pub staff_name: String,
    #[schema(example = "doctor")]
    pub staff_role: StaffRole,
}

#[derive(Serialize, ToSchema)]
pub struct BoardRow {
    #[schema(example = "morning")]
    pub shift_type: ShiftType,
    /// One cell per window day, in day order; a cell holds every shift of
    /// this type on that day (possibly none, possibly several).
    pub cells: Vec<Vec<BoardShift>>,
}

#[derive(Serialize, ToSchema)]
pub struct WeekBoardResponse {
    #[schema(example = "2024-06-09", format = "date", value_type = String)]
    pub week_start: NaiveDate,
    #[schema(value_type = Vec<String>)]
    pub days: Vec<NaiveDate>,
    pub rows: Vec<BoardRow>,
    /// Active staff, for the assignment form
    pub staff: Vec<Staff>,
}

/// The 7 consecutive dates starting at the Sunday of the anchor's week.
/// None when the window would run off the calendar's edge (chrono's date
/// range is finite and its plain arithmetic panics there).
pub(crate) fn week_window(anchor: NaiveDate) -> Option<[NaiveDate; 7]> {
    let start = anchor
        .checked_sub_signed(Duration::days(i64::from(anchor.weekday().num_days_from_sunday())))?;

    let mut days = [start; 7];
    for i in 1..7 {
        days[i] = days[i - 1].checked_add_signed(Duration::days(1))?;
    }
    Some(days)
}

/// Places every shift in exactly one cell: row = its type, column = its date.
/// Shifts outside the window are dropped (the query should not produce any).
pub(crate) fn build_grid(days: &[NaiveDate; 7], mut shifts: Vec<BoardShift>) -> Vec<BoardRow> {
    let mut rows: Vec<BoardRow> = ShiftType::iter()
        .map(|shift_type| BoardRow {
            shift_type,
            cells: vec![Vec::new(); 7],
        })
        .collect();

    for shift in shifts.drain(..) {
        let Some(col) = days.iter().position(|d| *d == shift.shift_date) else {
            continue;
        };
        if let Some(row) = rows.iter_mut().find(|r| r.shift_type == shift.shift_type) {
            row.cells[col].push(shift);
        }
    }

    rows
}

/// Week board: 3 rows (morning/afternoon/night) x 7 days
#[utoipa::path(
    get,
    path = "/api/v1/shifts/week",
    params(WeekQuery),
    responses(
        (status = 200, description = "Shift grid for the week containing the anchor date", body = WeekBoardResponse),
        (status = 400, description = "Anchor date out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn week_board(
    pool: web::Data<MySqlPool>,
    query: web::Query<WeekQuery>,
) -> actix_web::Result<impl Responder> {
    let anchor = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let days = week_window(anchor)
        .ok_or_else(|| actix_web::error::ErrorBadRequest("Anchor date out of range"))?;

    debug!(anchor = %anchor, week_start = %days[0], "Fetching week board");

    let shifts_fut = sqlx::query_as::<_, BoardShift>(
        r#"
        SELECT s.id, s.staff_id, s.shift_date, s.shift_type,
               st.name AS staff_name, st.role AS staff_role
        FROM shifts s
        INNER JOIN staff st ON st.id = s.staff_id
        WHERE s.shift_date BETWEEN ? AND ?
        "#,
    )
    .bind(days[0])
    .bind(days[6])
    .fetch_all(pool.get_ref());

    let staff_fut = sqlx::query_as::<_, Staff>(
        r#"
        SELECT id, name, role, email, active, created_at
        FROM staff
        WHERE active = TRUE
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool.get_ref());

    // Both halves of the board load together; either failing fails the fetch
    let (shifts, staff) = futures::try_join!(shifts_fut, staff_fut).map_err(|e| {
        error!(error = %e, week_start = %days[0], "Failed to fetch week board");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(WeekBoardResponse {
        week_start: days[0],
        days: days.to_vec(),
        rows: build_grid(&days, shifts),
        staff,
    }))
}

/// Assign a shift
#[utoipa::path(
    post,
    path = "/api/v1/shifts",
    request_body = CreateShift,
    responses(
        (status = 201, description = "Shift created", body = Object, example = json!({
            "message": "Shift created"
        })),
        (status = 400, description = "Referenced staff member does not exist"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn create_shift(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateShift>,
) -> actix_web::Result<impl Responder> {
    let result = sqlx::query(
        r#"
        INSERT INTO shifts (staff_id, shift_date, shift_type)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(payload.staff_id)
    .bind(payload.shift_date)
    .bind(payload.shift_type)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Shift created"
        }))),

        Err(e) => {
            // FK violation: the assignee is gone
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(json!({
                        "message": "Staff member does not exist"
                    })));
                }
            }

            error!(error = %e, staff_id = payload.staff_id, "Failed to create shift");
            Err(ErrorInternalServerError("Internal Server Error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn board_shift(id: u64, shift_date: &str, shift_type: ShiftType, name: &str) -> BoardShift {
        BoardShift {
            id,
            staff_id: id,
            shift_date: date(shift_date),
            shift_type,
            staff_name: name.to_string(),
            staff_role: StaffRole::Doctor,
        }
    }

    #[test]
    fn window_is_seven_consecutive_days_from_sunday() {
        // 2024-06-09 is a Sunday; every anchor in that week maps to it
        for day in 9..=15 {
            let anchor = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
            let window = week_window(anchor).unwrap();

            assert_eq!(window[0], date("2024-06-09"), "anchor {}", anchor);
            for i in 1..7 {
                assert_eq!(window[i], window[i - 1] + Duration::days(1));
            }
        }
    }

    #[test]
    fn window_handles_month_and_year_boundaries() {
        // 2024-01-01 is a Monday, so its week starts in 2023
        let window = week_window(date("2024-01-01")).unwrap();
        assert_eq!(window[0], date("2023-12-31"));
        assert_eq!(window[6], date("2024-01-06"));
    }

    #[test]
    fn window_answers_extreme_anchors_without_panicking() {
        // The last representable date cannot host a full week
        assert!(week_window(NaiveDate::MAX).is_none());
        // The first one may or may not, but must never panic
        let _ = week_window(NaiveDate::MIN);
    }

    #[test]
    fn shift_lands_in_exactly_one_cell() {
        let days = week_window(date("2024-06-10")).unwrap();
        let rows = build_grid(
            &days,
            vec![board_shift(1, "2024-06-10", ShiftType::Morning, "Bob")],
        );

        let mut occupied = 0;
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                if !cell.is_empty() {
                    occupied += 1;
                    // morning row, 2024-06-10 column (Monday of a Sunday-start week)
                    assert_eq!(r, 0);
                    assert_eq!(c, 1);
                    assert_eq!(cell[0].staff_name, "Bob");
                }
            }
        }
        assert_eq!(occupied, 1);
    }

    #[test]
    fn matching_shifts_stack_in_the_same_cell() {
        let days = week_window(date("2024-06-10")).unwrap();
        let rows = build_grid(
            &days,
            vec![
                board_shift(1, "2024-06-12", ShiftType::Night, "Alice"),
                board_shift(2, "2024-06-12", ShiftType::Night, "Bob"),
                board_shift(3, "2024-06-12", ShiftType::Morning, "Carol"),
            ],
        );

        let night = &rows[2];
        assert_eq!(night.shift_type, ShiftType::Night);
        assert_eq!(night.cells[3].len(), 2);
        assert_eq!(rows[0].cells[3].len(), 1);
    }

    #[test]
    fn grid_has_three_rows_of_seven_empty_cells_without_shifts() {
        let days = week_window(date("2024-06-10")).unwrap();
        let rows = build_grid(&days, Vec::new());

        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(row.cells.len(), 7);
            assert!(row.cells.iter().all(Vec::is_empty));
        }
    }
}
