// Display strings for the single supported locale (es), centralized so the
// views and the export agree on labels.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

// Indexed 0=Sunday .. 6=Saturday, matching the weekday convention of the
// service table.
const WEEKDAYS: [&str; 7] = [
    "domingo",
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
];

pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month as usize - 1).min(11)]
}

pub fn weekday_name(day: NaiveDate) -> &'static str {
    WEEKDAYS[day.weekday().num_days_from_sunday() as usize]
}

/// "junio 2024" — callers upper-case it where the layout asks for it.
pub fn month_year_label(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

/// Long heading for the editor panel: "miércoles, 5 de junio".
pub fn day_heading(day: NaiveDate) -> String {
    format!(
        "{}, {} de {}",
        weekday_name(day),
        day.day(),
        month_name(day.month())
    )
}

pub fn export_file_name(year: i32, month: u32) -> String {
    format!("cronograma-{}-{}.jpg", month_name(month), year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_and_weekday_names() {
        assert_eq!(month_name(1), "enero");
        assert_eq!(month_name(6), "junio");
        assert_eq!(weekday_name("2024-06-05".parse().unwrap()), "miércoles");
        assert_eq!(weekday_name("2024-06-02".parse().unwrap()), "domingo");
    }

    #[test]
    fn labels() {
        assert_eq!(month_year_label(2024, 6), "junio 2024");
        assert_eq!(
            day_heading("2024-06-05".parse().unwrap()),
            "miércoles, 5 de junio"
        );
    }

    #[test]
    fn export_file_name_pattern() {
        assert_eq!(export_file_name(2024, 6), "cronograma-junio-2024.jpg");
        assert_eq!(export_file_name(2025, 12), "cronograma-diciembre-2025.jpg");
    }
}
