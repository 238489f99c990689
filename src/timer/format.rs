//! Duration parsing and formatting.

use chrono::Duration;

/// Format a duration as MM:SS.
///
/// Minutes are not wrapped at 60, so a 90 minute duration renders as `90:00`.
#[must_use]
pub fn format_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Split a duration into whole minutes and leftover seconds.
#[must_use]
pub fn split_minutes_seconds(d: Duration) -> (i64, i64) {
    let total_seconds = d.num_seconds().max(0);
    (total_seconds / 60, total_seconds % 60)
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_human(d: Duration) -> String {
    let (minutes, seconds) = split_minutes_seconds(d);

    match (minutes, seconds) {
        (0, s) => format!("{} second{}", s, plural(s)),
        (m, 0) => format!("{} minute{}", m, plural(m)),
        (m, s) => format!("{} minute{}, {} second{}", m, plural(m), s, plural(s)),
    }
}

const fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Parse a duration string like "25m", "1m30s", "90s", or "05:00".
///
/// A bare number is taken as minutes. Returns `None` for malformed input,
/// zero, or values too large to represent.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return positive_seconds(minutes.checked_mul(60)?);
    }

    if let Some((m, sec)) = s.split_once(':') {
        let minutes: i64 = m.parse().ok()?;
        let seconds: i64 = sec.parse().ok()?;
        if minutes < 0 || !(0..60).contains(&seconds) {
            return None;
        }
        return positive_seconds(minutes.checked_mul(60)?.checked_add(seconds)?);
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        } else {
            return None;
        }
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    positive_seconds(total_seconds)
}

fn positive_seconds(total: i64) -> Option<Duration> {
    if total > 0 {
        Duration::try_seconds(total)
    } else {
        None
    }
}
