// Time-axis labeling
use crate::domain::series::Granularity;
use chrono::{Duration, Months, NaiveDateTime};

/// `count` instants ending at `now`, oldest first.
pub fn build_time_axis(count: usize, granularity: Granularity, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    let mut axis: Vec<NaiveDateTime> = (0..count)
        .map(|steps_back| step_back(now, granularity, steps_back))
        .collect();
    axis.reverse();
    axis
}

/// Labels for `count` steps ending at `now`, oldest first.
///
/// hour: `"H:00"`, day: short weekday, week: `"Week k"` counting from the
/// oldest, month: short month name.
pub fn build_time_labels(count: usize, granularity: Granularity, now: NaiveDateTime) -> Vec<String> {
    build_time_axis(count, granularity, now)
        .iter()
        .enumerate()
        .map(|(index, instant)| format_label(*instant, granularity, index))
        .collect()
}

/// Format one axis instant; `index` is its oldest-first position.
pub fn format_label(instant: NaiveDateTime, granularity: Granularity, index: usize) -> String {
    match granularity {
        Granularity::Hour => instant.format("%-H:00").to_string(),
        Granularity::Day => instant.format("%a").to_string(),
        Granularity::Week => format!("Week {}", index + 1),
        Granularity::Month => instant.format("%b").to_string(),
    }
}

/// Short month name `offset` calendar months away from `now` (negative = past).
pub fn month_label(now: NaiveDateTime, offset: i32) -> String {
    let shifted = if offset >= 0 {
        now.checked_add_months(Months::new(offset.unsigned_abs()))
    } else {
        now.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(now).format("%b").to_string()
}

fn step_back(now: NaiveDateTime, granularity: Granularity, steps: usize) -> NaiveDateTime {
    let steps_i64 = steps as i64;
    let stepped = match granularity {
        Granularity::Hour => Duration::try_hours(steps_i64).and_then(|d| now.checked_sub_signed(d)),
        Granularity::Day => Duration::try_days(steps_i64).and_then(|d| now.checked_sub_signed(d)),
        Granularity::Week => Duration::try_weeks(steps_i64).and_then(|d| now.checked_sub_signed(d)),
        Granularity::Month => u32::try_from(steps)
            .ok()
            .and_then(|months| now.checked_sub_months(Months::new(months))),
    };
    // Only reachable for absurd counts far past chrono's calendar range.
    stepped.unwrap_or(NaiveDateTime::MIN)
}
