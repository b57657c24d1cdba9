//! de-DE display formatting shared by every view.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Numeric date without zero padding, e.g. `15.1.2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

/// Long form used in profile headers, e.g. `15. Januar 2023`.
pub fn format_long_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{}. {} {}", date.day(), month, date.year())
}

pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

/// Integer with `.` thousands separators, e.g. `2.100`.
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Whole euros, rounded half away from zero: `15.751 €`.
pub fn format_currency_whole(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}{}\u{a0}€", group_thousands(&digits))
}

/// Euros with cents: `15.750,50 €`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let cents = cents.abs() as u64;
    format!(
        "{sign}{},{:02}\u{a0}€",
        format_count(cents / 100),
        cents % 100
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
