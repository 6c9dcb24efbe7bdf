//! Session duration formatting.

/// Format a duration in seconds as `HH:MM:SS`
///
/// **Public** - used by the text dashboard
///
/// Rounds half-up to whole seconds first. Hours are zero padded to two
/// digits but never clamped, so 100+ hours render with more digits.
/// Negative and non-finite input renders as `00:00:00`.
pub fn format_duration(duration_seconds: f64) -> String {
    let total = if duration_seconds.is_finite() && duration_seconds > 0.0 {
        duration_seconds.round() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
