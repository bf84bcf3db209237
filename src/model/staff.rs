use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Fixed staff role vocabulary. Stored lowercase in the `role` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum StaffRole {
    Doctor,
    Nurse,
    Technician,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Alice Rahman",
        "role": "nurse",
        "email": "alice@hospital.org",
        "active": true,
        "created_at": "2024-06-01T08:00:00Z"
    })
)]
pub struct Staff {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Alice Rahman")]
    pub name: String,

    #[schema(example = "nurse")]
    pub role: StaffRole,

    #[schema(example = "alice@hospital.org")]
    pub email: String,

    #[schema(example = true)]
    pub active: bool,

    #[schema(example = "2024-06-01T08:00:00Z", value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_parses_lowercase_names() {
        assert_eq!(StaffRole::from_str("doctor").unwrap(), StaffRole::Doctor);
        assert_eq!(StaffRole::from_str("nurse").unwrap(), StaffRole::Nurse);
        assert_eq!(
            StaffRole::from_str("technician").unwrap(),
            StaffRole::Technician
        );
    }

    #[test]
    fn role_rejects_unknown_names() {
        assert!(StaffRole::from_str("janitor").is_err());
        assert!(StaffRole::from_str("Doctor ").is_err());
    }

    #[test]
    fn role_displays_as_column_value() {
        assert_eq!(StaffRole::Technician.to_string(), "technician");
    }
}
