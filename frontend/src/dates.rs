//! Display formatting for dates and times, Spanish short forms.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// `7 ene 2024`
pub fn format_date(fecha: NaiveDate) -> String {
    format!(
        "{} {} {}",
        fecha.day(),
        MONTHS_ES[fecha.month0() as usize],
        fecha.year()
    )
}

/// `09:30`
pub fn format_time(hora: NaiveTime) -> String {
    format!("{:02}:{:02}", hora.hour(), hora.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_with_spanish_month_abbreviations() {
        let fecha = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(format_date(fecha), "7 ene 2024");

        let fecha = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_date(fecha), "31 dic 2025");
    }

    #[test]
    fn times_render_without_seconds() {
        let hora = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(format_time(hora), "09:30");

        let hora = NaiveTime::from_hms_opt(18, 5, 59).unwrap();
        assert_eq!(format_time(hora), "18:05");
    }
}
