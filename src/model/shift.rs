use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The three shift slots of a hospital day. Row order of the week board
/// follows the declaration order here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    sqlx::Type,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn shift_type_parses_lowercase_names() {
        assert_eq!(ShiftType::from_str("morning").unwrap(), ShiftType::Morning);
        assert_eq!(ShiftType::from_str("night").unwrap(), ShiftType::Night);
        assert!(ShiftType::from_str("evening").is_err());
    }

    #[test]
    fn board_rows_are_morning_afternoon_night() {
        let rows: Vec<ShiftType> = ShiftType::iter().collect();
        assert_eq!(
            rows,
            vec![ShiftType::Morning, ShiftType::Afternoon, ShiftType::Night]
        );
    }
}
