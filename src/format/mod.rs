//! Display formatting for amounts, dates and envelope timestamps.

use chrono::{Local, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Wall-clock timestamp placed in every response envelope.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `€ 10.566,55`
pub fn euro_nl(amount: f64) -> String {
    let (sign, units, cents) = split_cents(amount);
    format!("€ {}{},{:02}", sign, group_thousands(units, '.'), cents)
}

/// `1.1%`
pub fn percent(rate: f64) -> String {
    format!("{}%", rate)
}

fn split_cents(amount: f64) -> (&'static str, u64, u64) {
    let sign = if amount < 0.0 { "-" } else { "" };
    let total_cents = (amount.abs() * 100.0).round() as u64;
    (sign, total_cents / 100, total_cents % 100)
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// `19 August 2025`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// `11:05`
pub fn short_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// `19.08.2025`
pub fn dotted_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `2025-08-19`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `August 2025`
pub fn month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
