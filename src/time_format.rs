use std::fmt::Write;

use chrono::{Datelike, NaiveDate};

/// Format a snapshot date with its era: `206 BC`, `AD 742`.
/// Dates use astronomical year numbering, so year 0 is 1 BC.
pub fn format_date(date: NaiveDate) -> String {
    let mut out = String::with_capacity(10);
    write_date(&mut out, date);
    out
}

pub fn write_date(buf: &mut String, date: NaiveDate) {
    buf.clear();
    let year = date.year();
    if year > 0 {
        let _ = write!(buf, "AD {year}");
    } else {
        let _ = write!(buf, "{} BC", 1 - year);
    }
}

/// Parse `[-]YYYY[-MM[-DD]]` in astronomical numbering (`-0205` is 206 BC)
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let mut parts = rest.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 1,
    };
    let day: u32 = match parts.next() {
        Some(d) => d.parse().ok()?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(sign * year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_ad() {
        assert_eq!(format_date(ymd(742, 1, 1)), "AD 742");
    }

    #[test]
    fn formats_bc() {
        assert_eq!(format_date(ymd(-205, 1, 1)), "206 BC");
    }

    #[test]
    fn formats_year_zero_as_1_bc() {
        assert_eq!(format_date(ymd(0, 6, 1)), "1 BC");
    }

    #[test]
    fn parses_full_date() {
        assert_eq!(parse_date("1102-03-04"), Some(ymd(1102, 3, 4)));
    }

    #[test]
    fn parses_negative_year() {
        assert_eq!(parse_date("-0205-01-01"), Some(ymd(-205, 1, 1)));
        assert_eq!(parse_date("-205"), Some(ymd(-205, 1, 1)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("spring"), None);
        assert_eq!(parse_date("742-13-01"), None);
        assert_eq!(parse_date("742-01-01-01"), None);
        assert_eq!(parse_date(""), None);
    }
}
