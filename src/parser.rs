use crate::dates::extract_day_labels;
use crate::layout::MenuLayout;
use crate::menu::{MenuRecord, Section};
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

// Clock times, "~" ranges and the "중 식" label that shares a line with dishes.
static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}:\d{2}|~|중\s*식").expect("valid noise regex"));

pub fn normalize_line(line: &str) -> String {
    NOISE.replace_all(line, "").trim().to_string()
}

/// Split a line into exactly `columns` day cells, or `None` if it is not a
/// data row.
pub fn split_columns(line: &str, columns: usize) -> Option<Vec<String>> {
    let normalized = normalize_line(line);
    let cells: Vec<String> = normalized.split_whitespace().map(str::to_string).collect();
    if cells.len() != columns {
        return None;
    }
    Some(cells)
}

/// Trimmed, non-empty lines of the page text.
pub fn page_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn prefilter<'a>(lines: &'a [String], layout: &MenuLayout) -> Vec<&'a str> {
    lines
        .iter()
        .map(String::as_str)
        .filter(|line| !layout.is_excluded(line))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTracker {
    section: Option<Section>,
    row: usize,
}

impl SectionTracker {
    pub fn new(initial: Option<Section>) -> Self {
        Self { section: initial, row: 0 }
    }

    pub fn section(&self) -> Option<Section> {
        self.section
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn enter(&mut self, section: Section) {
        self.section = Some(section);
        self.row = 0;
    }

    fn advance(&mut self) {
        self.row += 1;
    }
}

/// Routes accepted rows into the per-day records.
pub struct RowRouter<'a> {
    layout: &'a MenuLayout,
    records: &'a mut [MenuRecord],
}

impl<'a> RowRouter<'a> {
    pub fn new(layout: &'a MenuLayout, records: &'a mut [MenuRecord]) -> Self {
        Self { layout, records }
    }

    /// Append cell i to record i in whichever zone the row counter falls in.
    /// Rows past the section's quota still advance the counter.
    pub fn route(&mut self, tracker: &mut SectionTracker, cells: &[String]) {
        let Some(section) = tracker.section() else {
            return;
        };
        match self.layout.zone_for(section, tracker.row()) {
            Some(zone) => {
                for (record, dish) in self.records.iter_mut().zip(cells) {
                    record.push(section, zone, dish);
                }
            }
            None => debug!(?section, row = tracker.row(), ?cells, "row past quota dropped"),
        }
        tracker.advance();
    }

    /// Credit a sentinel line's cells to `section` without consulting or
    /// advancing the counter.
    fn credit(&mut self, section: Section, cells: &[String]) {
        let Some(zone) = self.layout.first_zone(section) else {
            return;
        };
        for (record, dish) in self.records.iter_mut().zip(cells) {
            record.push(section, zone, dish);
        }
    }

    pub fn process_line(&mut self, tracker: &mut SectionTracker, line: &str) {
        let columns = self.layout.columns;
        if let Some(transition) = self.layout.transition_for(line) {
            if let Some(source) = transition.credit_from {
                if tracker.section() == Some(source) {
                    if let Some(cells) = split_columns(line, columns) {
                        self.credit(source, &cells);
                    }
                }
            }
            debug!(sentinel = %transition.sentinel, to = ?transition.to, "section change");
            tracker.enter(transition.to);
            return;
        }

        if self.layout.is_bare_skip(line) || tracker.section().is_none() {
            return;
        }
        if let Some(cells) = split_columns(line, columns) {
            self.route(tracker, &cells);
        }
    }
}

pub fn parse_menu(text: &str, layout: &MenuLayout) -> Vec<MenuRecord> {
    parse_menu_on(text, layout, Local::now().date_naive())
}

/// Parse one page of menu text. `today` only matters when the page carries
/// no date labels.
pub fn parse_menu_on(text: &str, layout: &MenuLayout, today: NaiveDate) -> Vec<MenuRecord> {
    let lines = page_lines(text);
    for (i, line) in lines.iter().enumerate() {
        debug!(i, %line, "raw line");
    }

    let labels = extract_day_labels(&lines[..], today);
    debug!(?labels, "resolved day labels");
    if labels.len() != layout.columns {
        warn!(
            labels = labels.len(),
            columns = layout.columns,
            "day label count does not match column count; extra columns are dropped"
        );
    }
    let mut records: Vec<MenuRecord> = labels.into_iter().map(MenuRecord::new).collect();

    let filtered = prefilter(&lines, layout);
    for (i, line) in filtered.iter().enumerate() {
        debug!(i, %line, "filtered line");
    }

    let mut tracker = SectionTracker::new(layout.initial);
    let mut router = RowRouter::new(layout, &mut records);
    for line in filtered.into_iter().skip(layout.skip_leading) {
        router.process_line(&mut tracker, line);
    }

    debug!(?records, "parsed menu");
    records
}
