use std::time::Duration;

/// Format a `Duration` as `m:ss`, truncating fractional seconds.
///
/// Minutes are not padded and keep counting past the hour: 3600s is `60:00`.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
