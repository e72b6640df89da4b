use chrono::NaiveDate;

/// Formats an ISO `YYYY-MM-DD` date for display, e.g. `Jan 5, 2024`.
///
/// Empty input renders as `N/A`; anything that is not an ISO date is shown
/// as given.
pub fn format_date(date: &str) -> String {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return "N/A".to_string();
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d, %Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}
