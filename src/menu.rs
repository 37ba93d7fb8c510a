use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Breakfast,
    Lunch,
    Dinner,
}

/// Lunch serving station. Serialized with the labels the cafeteria prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "A코너", alias = "A")]
    A,
    #[serde(rename = "B코너", alias = "B")]
    B,
    #[serde(rename = "셀프코너", alias = "Self")]
    SelfService,
}

impl Corner {
    pub const ALL: [Corner; 3] = [Corner::A, Corner::B, Corner::SelfService];
}

/// Where inside a section a row lands: the section's single dish list, or
/// one of the lunch corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Main,
    Corner(Corner),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub date: String,
    #[serde(rename = "조식")]
    pub breakfast: Vec<String>,
    #[serde(rename = "중식")]
    pub lunch: BTreeMap<Corner, Vec<String>>,
    #[serde(rename = "석식")]
    pub dinner: Vec<String>,
}

impl MenuRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            breakfast: Vec::new(),
            lunch: Corner::ALL.iter().map(|c| (*c, Vec::new())).collect(),
            dinner: Vec::new(),
        }
    }

    pub fn push(&mut self, section: Section, zone: Zone, dish: &str) {
        let dish = dish.to_string();
        match (section, zone) {
            (Section::Breakfast, _) => self.breakfast.push(dish),
            (Section::Dinner, _) => self.dinner.push(dish),
            (Section::Lunch, Zone::Corner(corner)) => self.lunch.entry(corner).or_default().push(dish),
            // MenuLayout::validate rejects lunch quotas without a corner.
            (Section::Lunch, Zone::Main) => {}
        }
    }

    pub fn corner(&self, corner: Corner) -> &[String] {
        self.lunch.get(&corner).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.breakfast.is_empty() && self.dinner.is_empty() && self.lunch.values().all(Vec::is_empty)
    }
}
