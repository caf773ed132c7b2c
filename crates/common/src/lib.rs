pub mod types;
pub mod utils;
pub mod env;
pub mod admin_http;

/// Format an amount held in cents as a dollar string with two decimals.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
