//! The fixed budget taxonomy and per-category totals

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard budget categories every merchant category is normalized onto
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardCategory {
    Food,
    Transportation,
    Entertainment,
    Lodging,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[default]
    Other,
}

impl StandardCategory {
    pub const ALL: [StandardCategory; 6] = [
        StandardCategory::Food,
        StandardCategory::Transportation,
        StandardCategory::Entertainment,
        StandardCategory::Lodging,
        StandardCategory::PersonalCare,
        StandardCategory::Other,
    ];

    /// Display name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardCategory::Food => "Food",
            StandardCategory::Transportation => "Transportation",
            StandardCategory::Entertainment => "Entertainment",
            StandardCategory::Lodging => "Lodging",
            StandardCategory::PersonalCare => "Personal Care",
            StandardCategory::Other => "Other",
        }
    }
}

impl fmt::Display for StandardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative amount per standard category.
///
/// Only categories that occurred at least once have a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<StandardCategory, f64>);

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: StandardCategory, amount: f64) {
        *self.0.entry(category).or_insert(0.0) += amount;
    }

    pub fn get(&self, category: StandardCategory) -> Option<f64> {
        self.0.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StandardCategory, f64)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn grand_total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(StandardCategory, f64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (StandardCategory, f64)>>(iter: I) -> Self {
        let mut totals = CategoryTotals::new();
        for (category, amount) in iter {
            totals.add(category, amount);
        }
        totals
    }
}
