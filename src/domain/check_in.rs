use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

string_enum!(MealType, "meal type" {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
});

impl MealType {
    /// Case-insensitive parse, as typed by scanner clients.
    pub fn parse_loose(s: &str) -> Option<Self> {
        s.trim().to_ascii_lowercase().parse().ok()
    }
}

string_enum!(CheckInStatus, "check-in status" {
    Success => "success",
    Failed => "failed",
});

#[derive(Debug, Clone)]
pub struct CheckIn {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Mess reference copied from the meal pass.
    pub mess_id: Uuid,
    pub meal_pass_id: Uuid,
    pub meal_type: MealType,
    pub status: CheckInStatus,
    pub failure_reason: Option<String>,
    /// UTC calendar day the meal was served.
    pub served_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub user_id: Uuid,
    pub mess_id: Uuid,
    pub meal_pass_id: Uuid,
    pub meal_type: MealType,
    pub served_on: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct CheckInFilter {
    pub user_id: Option<Uuid>,
    pub served_on: Option<NaiveDate>,
    pub meal_type: Option<MealType>,
}

impl CheckInFilter {
    pub fn matches(&self, check_in: &CheckIn) -> bool {
        self.user_id.is_none_or(|u| u == check_in.user_id)
            && self.served_on.is_none_or(|d| d == check_in.served_on)
            && self.meal_type.is_none_or(|m| m == check_in.meal_type)
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 or a bare `YYYY-MM-DDTHH:MM:SS`; the calendar
/// date as written selects the day.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealTally {
    pub breakfast: i64,
    pub lunch: i64,
    pub dinner: i64,
}

impl MealTally {
    pub fn add(&mut self, meal: MealType, count: i64) {
        match meal {
            MealType::Breakfast => self.breakfast += count,
            MealType::Lunch => self.lunch += count,
            MealType::Dinner => self.dinner += count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_parse_is_case_insensitive() {
        assert_eq!(MealType::parse_loose("Lunch"), Some(MealType::Lunch));
        assert_eq!(MealType::parse_loose(" DINNER "), Some(MealType::Dinner));
        assert_eq!(MealType::parse_loose("brunch"), None);
    }

    #[test]
    fn parse_day_accepts_common_shapes() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_day("2024-02-29"), Some(d));
        assert_eq!(parse_day("2024-02-29T23:10:00Z"), Some(d));
        assert_eq!(parse_day("2024-02-29T23:10:00+05:30"), Some(d));
        assert_eq!(parse_day("2024-02-29T08:00:00"), Some(d));
        assert_eq!(parse_day("yesterday"), None);
    }

    #[test]
    fn tally_counts_per_meal() {
        let mut tally = MealTally::default();
        tally.add(MealType::Lunch, 2);
        tally.add(MealType::Dinner, 1);
        tally.add(MealType::Lunch, 1);
        assert_eq!(
            tally,
            MealTally {
                breakfast: 0,
                lunch: 3,
                dinner: 1
            }
        );
    }
}
