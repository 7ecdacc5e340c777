//! Game clock formatting.
//!
//! Everything that prints an in-game time (CLI output, log lines) goes
//! through here so the clock always reads the same way the game shows it.

/// Format whole game seconds as `M:SS`.
///
/// # Examples
/// ```
/// use warden_types::formatting::format_game_time;
/// assert_eq!(format_game_time(125), "2:05");
/// assert_eq!(format_game_time(59), "0:59");
/// assert_eq!(format_game_time(0), "0:00");
/// ```
pub fn format_game_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format the time remaining until `target`, as seen from `now`.
///
/// - Past or current targets: returns `zero_label`
/// - Remaining >= 60s: `M:SS`
/// - Otherwise: whole seconds with `s` suffix
///
/// # Examples
/// ```
/// use warden_types::formatting::format_countdown;
/// assert_eq!(format_countdown(600, 525, "up"), "1:15");
/// assert_eq!(format_countdown(600, 570, "up"), "30s");
/// assert_eq!(format_countdown(600, 600, "up"), "up");
/// ```
pub fn format_countdown(target: u32, now: u32, zero_label: &str) -> String {
    let Some(remaining) = target.checked_sub(now).filter(|r| *r > 0) else {
        return zero_label.to_string();
    };
    if remaining >= 60 {
        format_game_time(remaining)
    } else {
        format!("{}s", remaining)
    }
}
