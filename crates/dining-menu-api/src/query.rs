
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Meal period segment of the provider URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealPeriod {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

/// Parameters of a weekly-menu request: institution, meal period and date.
#[derive(Debug, Clone)]
pub struct MenuQuery {
    school: String,
    meal: MealPeriod,
    date: NaiveDate,
}

impl MenuQuery {
    pub fn new(
        school: impl Into<String>,
        meal: MealPeriod,
        date: NaiveDate,
    ) -> Self {
        Self { school: school.into(), meal, date }
    }

    /// Path below the provider base url, trailing slash included.
    pub fn path(&self) -> String {
        format!(
            "menu/api/weeks/school/{}/menu-type/{}/{:04}/{:02}/{:02}/",
            self.school,
            self.meal.as_str(),
            self.date.year(),
            self.date.month(),
            self.date.day(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_zero_padded() {
        let query = MenuQuery::new(
            "valentine-hall",
            MealPeriod::Dinner,
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        );
        assert_eq!(
            query.path(),
            "menu/api/weeks/school/valentine-hall/menu-type/dinner/2025/03/09/",
        );
    }

    #[test]
    fn meal_period_from_query_string() {
        let meal: MealPeriod = serde_json::from_str("\"breakfast\"").unwrap();
        assert_eq!(meal, MealPeriod::Breakfast);
    }
}
