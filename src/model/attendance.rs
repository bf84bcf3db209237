use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Attendance status is freely settable by an operator; no value is ever
/// derived from check_in/check_out here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Pending,
    Present,
    Absent,
    Late,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
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

    #[schema(example = "2024-06-10T00:00:00Z", value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_parses_lowercase_names() {
        assert_eq!(
            AttendanceStatus::from_str("pending").unwrap(),
            AttendanceStatus::Pending
        );
        assert_eq!(
            AttendanceStatus::from_str("late").unwrap(),
            AttendanceStatus::Late
        );
        assert!(AttendanceStatus::from_str("on-time").is_err());
    }

    #[test]
    fn status_displays_as_column_value() {
        assert_eq!(AttendanceStatus::Absent.to_string(), "absent");
    }
}
