use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// True when both dates fall in the same calendar month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(p: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&(p.trim().to_string() + "-01"), "%Y-%m-%d").ok()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        12 => "dezembro",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parsing() {
        let d = parse_month("2025-02").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert!(parse_month("2025-13").is_none());
        assert!(parse_month("feb").is_none());
    }

    #[test]
    fn same_month_checks_year_too() {
        let a = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let c = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert!(same_month(a, b));
        assert!(!same_month(a, c));
    }
}
