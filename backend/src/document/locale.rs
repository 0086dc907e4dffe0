//! Fixed Indonesian (id-ID) date rendering used throughout the decree text.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// How the day of month is printed in a long date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStyle {
    /// `01 Januari 2024`
    TwoDigit,
    /// `1 Januari 2024`
    Numeric,
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// `01 Januari 2024` / `1 Januari 2024`.
pub fn long_date(date: NaiveDate, day: DayStyle) -> String {
    match day {
        DayStyle::TwoDigit => format!("{:02} {} {}", date.day(), month_name(date), date.year()),
        DayStyle::Numeric => format!("{} {} {}", date.day(), month_name(date), date.year()),
    }
}

/// `01-01-2024`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
