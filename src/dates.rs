use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DATE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}월\s*\d{1,2}일\s*\([월화수목금]\)").expect("valid date label regex")
});

const WEEKDAYS: [&str; 5] = ["월", "화", "수", "목", "금"];

/// Collect every "M월 D일(요일)" label in encounter order, falling back to the
/// Monday–Friday of `today`'s week when the page has none.
pub fn extract_day_labels<S: AsRef<str>>(lines: &[S], today: NaiveDate) -> Vec<String> {
    let mut labels = Vec::new();
    for line in lines {
        let found: Vec<_> = DATE_LABEL
            .find_iter(line.as_ref())
            .map(|m| m.as_str().to_string())
            .collect();
        if !found.is_empty() {
            debug!(?found, "found dates in line");
            labels.extend(found);
        }
    }

    if labels.is_empty() {
        debug!(%today, "no date labels found, using current week");
        return current_week_labels(today);
    }
    labels
}

pub fn week_monday(today: NaiveDate) -> NaiveDate {
    today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64)
}

pub fn current_week_labels(today: NaiveDate) -> Vec<String> {
    let monday = week_monday(today);
    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(offset, weekday)| {
            let day = monday + chrono::Duration::days(offset as i64);
            format!("{}월 {}일({})", day.month(), day.day(), weekday)
        })
        .collect()
}
