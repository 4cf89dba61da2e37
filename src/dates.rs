//! Clock and due-date helpers.

use chrono::{Datelike, Local, NaiveDate, NaiveTime, TimeDelta, Timelike};

/// Current local wall-clock time, truncated to whole seconds.
pub fn now_time() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), now.second()).unwrap_or(now)
}

/// Format a time as `HH:MM:SS`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Format an optional due date as ISO, or the empty string.
pub fn format_due(due: Option<NaiveDate>) -> String {
    due.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Parse due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "mon".."sun", "monday".."sunday", with optional "next "/"this " prefix
/// - "weekend", "end of week"/"eow", "end of month"/"eom"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD"
///
/// Negative offsets and dates outside chrono's range give `None`.
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        "end of week" | "eow" => {
            return start_end_of_week(today).map(|(_, end)| end);
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            return NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt();
        }
        "this weekend" | "weekend" => {
            let days_until_saturday = (5 + 7 - today.weekday().num_days_from_monday()) % 7;
            return days_after(today, days_until_saturday as i64);
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        let split = rest.char_indices().last().map_or(0, |(i, _)| i);
        let (count, unit) = rest.split_at(split);
        if let Ok(n) = count.trim().parse::<i64>() {
            if n < 0 {
                return None;
            }
            let delta = match unit {
                "d" => TimeDelta::try_days(n),
                "w" => TimeDelta::try_weeks(n),
                // Approximate: 30 days per month
                "m" => n.checked_mul(30).and_then(TimeDelta::try_days),
                _ => None,
            };
            return today.checked_add_signed(delta?);
        }
    }

    let (next_week, day) = if let Some(d) = s.strip_prefix("next ") {
        (true, d)
    } else if let Some(d) = s.strip_prefix("this ") {
        (false, d)
    } else {
        (false, s.as_str())
    };
    if let Some(target) = weekday_index(day) {
        let current = today.weekday().num_days_from_monday();
        let ahead = (target + 7 - current) % 7;
        let ahead = if next_week { ahead + 7 } else { ahead };
        return days_after(today, ahead as i64);
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn days_after(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

fn weekday_index(name: &str) -> Option<u32> {
    const DAYS: [&str; 7] = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];
    DAYS.iter()
        .position(|d| *d == name || (name.len() == 3 && d.starts_with(name)))
        .map(|i| i as u32)
}

/// Start and end of the ISO week (Monday to Sunday) containing `today`.
pub fn start_end_of_week(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = days_after(today, -weekday)?;
    Some((start, days_after(start, 6)?))
}
