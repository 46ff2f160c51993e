use chrono::{Duration, NaiveDate};

use crate::config::ScheduleConfig;

pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    use chrono::Datelike;
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    (first_of_next.expect("valid month") - Duration::days(1)).day()
}

/// Every day of the closed interval [first of month, last of month].
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=last_day_of_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

/// The days of the month that land on a configured service weekday, in
/// ascending order. Days of any other weekday are not shown at all.
pub fn service_days(year: i32, month: u32, config: &ScheduleConfig) -> Vec<NaiveDate> {
    month_days(year, month)
        .into_iter()
        .filter(|day| config.is_service_day(*day))
        .collect()
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn month_lengths() {
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2023, 2), 28);
        assert_eq!(last_day_of_month(2024, 6), 30);
        assert_eq!(last_day_of_month(2024, 12), 31);
    }

    #[test]
    fn navigation_rolls_over_year_boundaries() {
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(prev_month(2024, 7), (2024, 6));
        assert_eq!(next_month(2024, 7), (2024, 8));
    }

    #[test]
    fn projection_keeps_only_configured_weekdays() {
        let config = ScheduleConfig::default();
        let days = service_days(2024, 6, &config);
        // June 2024: 5 Sundays, 4 Wednesdays, 5 Saturdays.
        assert_eq!(days.len(), 14);
        for day in &days {
            assert!(
                matches!(day.weekday().num_days_from_sunday(), 0 | 3 | 6),
                "unexpected weekday in grid: {day}"
            );
        }
        assert!(days.contains(&"2024-06-05".parse().unwrap()));
        assert!(!days.contains(&"2024-06-04".parse().unwrap()));
    }

    #[test]
    fn projection_is_sorted_and_bounded_to_the_month() {
        let config = ScheduleConfig::default();
        let days = service_days(2024, 6, &config);
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(days.first().unwrap().to_string(), "2024-06-01");
        assert_eq!(days.last().unwrap().to_string(), "2024-06-30");
    }
}
