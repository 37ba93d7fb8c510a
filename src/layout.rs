//! Layout table describing where the weekly menu PDF puts each meal.
//!
//! The cafeteria sheet has no machine-readable structure. Sections are found
//! through a handful of fixed phrases and each section holds a fixed number of
//! five-column rows, so both are kept here as data instead of being spread
//! through the parser.

use crate::error::MenuError;
use crate::menu::{Corner, Section, Zone};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const SELF_TOAST: &str = "셀프토스트";
pub const SALAD_BOX: &str = "SALAD BOX";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Substring that, when present in a line, switches sections.
    pub sentinel: String,
    pub to: Section,
    /// When the line is seen while this section is active, its own row is
    /// credited to that section before switching.
    #[serde(default)]
    pub credit_from: Option<Section>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub zone: Zone,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLayout {
    /// Section in effect before any sentinel is seen. `None` ignores rows
    /// until the first transition.
    pub initial: Option<Section>,
    /// Filtered lines dropped unconditionally at the top of the page.
    #[serde(default)]
    pub skip_leading: usize,
    pub transitions: Vec<Transition>,
    pub quotas: BTreeMap<Section, Vec<Quota>>,
    /// Lines containing any of these are removed before section tracking.
    pub exclude: Vec<String>,
    /// Lines equal to one of these (after trimming) are never routed.
    pub bare_skip: Vec<String>,
    #[serde(default = "default_columns")]
    pub columns: usize,
}

fn default_columns() -> usize {
    5
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_exclude() -> Vec<String> {
    owned(&["식단", "코너", "Take Out", "※", "--", "판교세븐", "주간메뉴"])
}

fn default_bare_skip() -> Vec<String> {
    owned(&["코너", "식", "Take Out", "※"])
}

impl MenuLayout {
    /// Breakfast, three lunch corners and dinner on one sheet.
    pub fn full_day() -> Self {
        let mut quotas = BTreeMap::new();
        quotas.insert(Section::Breakfast, vec![Quota { zone: Zone::Main, rows: 6 }]);
        quotas.insert(
            Section::Lunch,
            vec![
                Quota { zone: Zone::Corner(Corner::A), rows: 4 },
                Quota { zone: Zone::Corner(Corner::B), rows: 4 },
                Quota { zone: Zone::Corner(Corner::SelfService), rows: 2 },
            ],
        );
        quotas.insert(Section::Dinner, vec![Quota { zone: Zone::Main, rows: 6 }]);

        Self {
            initial: Some(Section::Breakfast),
            // The first surviving line is the date header.
            skip_leading: 1,
            transitions: vec![
                Transition {
                    sentinel: SELF_TOAST.to_string(),
                    to: Section::Lunch,
                    credit_from: Some(Section::Breakfast),
                },
                Transition {
                    sentinel: SALAD_BOX.to_string(),
                    to: Section::Dinner,
                    credit_from: None,
                },
            ],
            quotas,
            exclude: default_exclude(),
            bare_skip: default_bare_skip(),
            columns: default_columns(),
        }
    }

    /// Older sheet variant where only the A and B lunch corners are read.
    pub fn lunch_only() -> Self {
        let mut quotas = BTreeMap::new();
        quotas.insert(
            Section::Lunch,
            vec![
                Quota { zone: Zone::Corner(Corner::A), rows: 4 },
                Quota { zone: Zone::Corner(Corner::B), rows: 4 },
            ],
        );

        Self {
            initial: None,
            skip_leading: 0,
            transitions: vec![
                Transition {
                    sentinel: SELF_TOAST.to_string(),
                    to: Section::Lunch,
                    credit_from: None,
                },
                // Dinner has no quota here, so everything after the salad
                // box line is dropped.
                Transition {
                    sentinel: SALAD_BOX.to_string(),
                    to: Section::Dinner,
                    credit_from: None,
                },
            ],
            quotas,
            exclude: default_exclude(),
            bare_skip: default_bare_skip(),
            columns: default_columns(),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {:?}", path))?;
        let layout: MenuLayout = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse layout JSON: {:?}", path))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), MenuError> {
        if self.columns == 0 {
            return Err(MenuError::InvalidLayout("columns must be at least 1".into()));
        }
        for (section, quotas) in &self.quotas {
            for quota in quotas {
                let ok = match (section, quota.zone) {
                    (Section::Lunch, Zone::Corner(_)) => true,
                    (Section::Lunch, Zone::Main) => false,
                    (_, Zone::Main) => true,
                    (_, Zone::Corner(_)) => false,
                };
                if !ok {
                    return Err(MenuError::InvalidLayout(format!(
                        "{:?} cannot use zone {:?}",
                        section, quota.zone
                    )));
                }
            }
        }
        if self.transitions.iter().any(|t| t.sentinel.is_empty()) {
            return Err(MenuError::InvalidLayout("empty transition sentinel".into()));
        }
        Ok(())
    }

    pub fn transition_for(&self, line: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| line.contains(t.sentinel.as_str()))
    }

    pub fn is_excluded(&self, line: &str) -> bool {
        self.exclude.iter().any(|word| line.contains(word.as_str()))
    }

    pub fn is_bare_skip(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.bare_skip.iter().any(|word| word == trimmed)
    }

    /// Zone for the `row`-th accepted row (0-based) of `section`, or `None`
    /// once the section's quota is used up.
    pub fn zone_for(&self, section: Section, row: usize) -> Option<Zone> {
        let mut ceiling = 0;
        for quota in self.quotas.get(&section)? {
            ceiling += quota.rows;
            if row < ceiling {
                return Some(quota.zone);
            }
        }
        None
    }

    pub fn first_zone(&self, section: Section) -> Option<Zone> {
        self.quotas.get(&section)?.first().map(|q| q.zone)
    }
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self::full_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_day_thresholds() {
        let layout = MenuLayout::full_day();
        assert_eq!(layout.zone_for(Section::Breakfast, 5), Some(Zone::Main));
        assert_eq!(layout.zone_for(Section::Breakfast, 6), None);
        assert_eq!(layout.zone_for(Section::Lunch, 3), Some(Zone::Corner(Corner::A)));
        assert_eq!(layout.zone_for(Section::Lunch, 4), Some(Zone::Corner(Corner::B)));
        assert_eq!(layout.zone_for(Section::Lunch, 8), Some(Zone::Corner(Corner::SelfService)));
        assert_eq!(layout.zone_for(Section::Lunch, 9), Some(Zone::Corner(Corner::SelfService)));
        assert_eq!(layout.zone_for(Section::Lunch, 10), None);
        assert_eq!(layout.zone_for(Section::Dinner, 6), None);
    }

    #[test]
    fn lunch_only_has_no_self_corner_or_dinner() {
        let layout = MenuLayout::lunch_only();
        assert_eq!(layout.zone_for(Section::Lunch, 8), None);
        assert_eq!(layout.zone_for(Section::Dinner, 0), None);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn first_matching_transition_wins() {
        let layout = MenuLayout::full_day();
        let t = layout.transition_for("셀프토스트 SALAD BOX").unwrap();
        assert_eq!(t.to, Section::Lunch);
        assert!(layout.transition_for("김치찌개").is_none());
    }

    #[test]
    fn bare_skip_matches_whole_line_only() {
        let layout = MenuLayout::full_day();
        assert!(layout.is_bare_skip("  ※ "));
        assert!(!layout.is_bare_skip("식빵"));
    }

    #[test]
    fn rejects_lunch_quota_without_corner() {
        let mut layout = MenuLayout::full_day();
        layout
            .quotas
            .insert(Section::Lunch, vec![Quota { zone: Zone::Main, rows: 2 }]);
        assert!(matches!(layout.validate(), Err(MenuError::InvalidLayout(_))));
    }

    #[test]
    fn layout_json_uses_short_corner_aliases() {
        let raw = r#"{
            "initial": "lunch",
            "transitions": [],
            "quotas": { "lunch": [ { "zone": { "corner": "B" }, "rows": 3 } ] },
            "exclude": [],
            "bare_skip": []
        }"#;
        let layout: MenuLayout = serde_json::from_str(raw).unwrap();
        assert_eq!(layout.columns, 5);
        assert_eq!(layout.zone_for(Section::Lunch, 2), Some(Zone::Corner(Corner::B)));
        assert!(layout.validate().is_ok());
    }
}
