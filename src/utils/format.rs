use chrono::NaiveDate;

/// Formats remaining seconds as the `MM:SS` string shown on the timer
/// screen. Minutes are not capped at 59, a 90 minute phase renders as
/// `90:00`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// This is the standard way of converting a date to a session file name in
/// tomatick.
pub fn date_to_session_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
