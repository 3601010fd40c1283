use time::{Date, Duration};

use crate::config::DateFormat;
use crate::extract::Weekday;

/// Project the week-ending Saturday onto the six operating days:
/// Monday = Saturday - 5 through Saturday itself.
pub fn project_week(week_ending: Date) -> [Date; 6] {
    Weekday::ALL.map(|day| week_ending - Duration::days(day.offset_from_saturday()))
}

/// Render a date in the configured output format.
pub fn render(date: Date, format: DateFormat) -> String {
    let (year, month, day) = (date.year(), u8::from(date.month()), date.day());
    match format {
        DateFormat::Iso => format!("{year:04}-{month:02}-{day:02}"),
        DateFormat::Uk => format!("{day:02}/{month:02}/{year:04}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_projection_shape() {
        for saturday in [
            date!(2025 - 09 - 14),
            date!(2024 - 12 - 28),
            date!(2026 - 02 - 28),
        ] {
            let week = project_week(saturday);
            assert_eq!(week.len(), 6);
            assert_eq!(week[0], saturday - Duration::days(5));
            assert_eq!(week[5], saturday);
            for pair in week.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
        }
    }

    #[test]
    fn test_projection_crosses_month_boundary() {
        let week = project_week(date!(2025 - 10 - 04));
        assert_eq!(week[0], date!(2025 - 09 - 29));
        assert_eq!(week[2], date!(2025 - 10 - 01));
    }

    #[test]
    fn test_projection_crosses_year_boundary() {
        let week = project_week(date!(2026 - 01 - 03));
        assert_eq!(week[0], date!(2025 - 12 - 29));
        assert_eq!(week[5], date!(2026 - 01 - 03));
    }

    #[test]
    fn test_render_iso_and_uk() {
        let d = date!(2025 - 09 - 09);
        assert_eq!(render(d, DateFormat::Iso), "2025-09-09");
        assert_eq!(render(d, DateFormat::Uk), "09/09/2025");
    }
}
