use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

use crate::error::DisplayError;

/// One of the six population compartments shown by the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Susceptible,
    Infected,
    Hospitalized,
    Icu,
    Recovered,
    Fatalities,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Susceptible,
        Category::Infected,
        Category::Hospitalized,
        Category::Icu,
        Category::Recovered,
        Category::Fatalities,
    ];

    /// Field name of this category on a `PopulationSnapshot`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Susceptible => "susceptible",
            Category::Infected => "infected",
            Category::Hospitalized => "hospitalized",
            Category::Icu => "icu",
            Category::Recovered => "recovered",
            Category::Fatalities => "fatalities",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Population counts for a single simulated day.
///
/// Counts are floats because the simulation produces continuous
/// approximations. Any field may be NaN when the upstream value is missing;
/// the formatting helpers render those as blanks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    susceptible: f64,
    infected: f64,
    hospitalized: f64,
    icu: f64,
    recovered: f64,
    fatalities: f64,
}

impl PopulationSnapshot {
    pub fn new(
        susceptible: f64,
        infected: f64,
        hospitalized: f64,
        icu: f64,
        recovered: f64,
        fatalities: f64,
    ) -> Self {
        Self {
            susceptible,
            infected,
            hospitalized,
            icu,
            recovered,
            fatalities,
        }
    }

    pub fn susceptible(&self) -> f64 {
        self.susceptible
    }

    pub fn infected(&self) -> f64 {
        self.infected
    }

    pub fn hospitalized(&self) -> f64 {
        self.hospitalized
    }

    pub fn icu(&self) -> f64 {
        self.icu
    }

    pub fn recovered(&self) -> f64 {
        self.recovered
    }

    pub fn fatalities(&self) -> f64 {
        self.fatalities
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Susceptible => self.susceptible,
            Category::Infected => self.infected,
            Category::Hospitalized => self.hospitalized,
            Category::Icu => self.icu,
            Category::Recovered => self.recovered,
            Category::Fatalities => self.fatalities,
        }
    }

    /// Sum over all six compartments. NaN in any field propagates.
    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Display metadata for one category: legend label, tooltip text,
/// toggle behaviour and chart colour.
///
/// Serialized with the key names the chart front end reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryMeta {
    pub key: Category,
    #[serde(rename = "tooltip_title")]
    pub title: &'static str,
    #[serde(rename = "tooltip_desc")]
    pub description: &'static str,
    pub checkable: bool,
    #[serde(rename = "checked")]
    pub checked_by_default: bool,
    pub color: &'static str,
}

/// Chart margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPadding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

pub const CHART_PADDING: ChartPadding = ChartPadding {
    top: 20,
    right: 0,
    bottom: 20,
    left: 25,
};

/// Which scenario produced the time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "goh")]
    Goh,
    #[serde(rename = "customScenario")]
    CustomScenario,
}

impl ModelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Goh => "goh",
            ModelKind::CustomScenario => "customScenario",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "goh" => Ok(ModelKind::Goh),
            "customScenario" => Ok(ModelKind::CustomScenario),
            other => Err(DisplayError::UnknownModel(other.to_string())),
        }
    }
}

/// A row of the snapshot CSV before validation. Every field is kept as a
/// string so one bad cell does not reject the whole row.
#[derive(Debug, Deserialize)]
pub struct RawSnapshotRow {
    pub day: Option<String>,
    pub susceptible: Option<String>,
    pub infected: Option<String>,
    pub hospitalized: Option<String>,
    pub icu: Option<String>,
    pub recovered: Option<String>,
    pub fatalities: Option<String>,
}

/// A snapshot together with its day offset from the first chart bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySnapshot {
    pub day: i64,
    pub snapshot: PopulationSnapshot,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DailyRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Susceptible")]
    #[tabled(rename = "Susceptible")]
    pub susceptible: String,
    #[serde(rename = "Infected")]
    #[tabled(rename = "Infected")]
    pub infected: String,
    #[serde(rename = "Hospitalized")]
    #[tabled(rename = "Hospitalized")]
    pub hospitalized: String,
    #[serde(rename = "ICU")]
    #[tabled(rename = "ICU")]
    pub icu: String,
    #[serde(rename = "Recovered")]
    #[tabled(rename = "Recovered")]
    pub recovered: String,
    #[serde(rename = "Fatalities")]
    #[tabled(rename = "Fatalities")]
    pub fatalities: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TooltipRow {
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub title: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: String,
    #[serde(rename = "Delta")]
    #[tabled(rename = "Delta")]
    pub delta: String,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct LegendRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Toggle")]
    pub toggle: String,
    #[tabled(rename = "Color")]
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub model: ModelKind,
    pub first_date: String,
    pub last_date: String,
    pub total_days: usize,
    /// Calendar days between the first and last row.
    pub span_days: i64,
    pub peak_infected: String,
    pub peak_infected_date: String,
    pub final_fatalities: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_fields_by_category() {
        let s = PopulationSnapshot::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let values: Vec<f64> = Category::ALL.iter().map(|c| s.get(*c)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(s.icu(), 4.0);
        assert_eq!(s.total(), 21.0);
    }

    #[test]
    fn total_propagates_nan() {
        let s = PopulationSnapshot::new(1.0, f64::NAN, 0.0, 0.0, 0.0, 0.0);
        assert!(s.total().is_nan());
    }

    #[test]
    fn model_kind_parses_front_end_names() {
        assert_eq!("goh".parse::<ModelKind>().unwrap(), ModelKind::Goh);
        assert_eq!(
            "customScenario".parse::<ModelKind>().unwrap(),
            ModelKind::CustomScenario
        );
        assert!("seir".parse::<ModelKind>().is_err());
    }

    #[test]
    fn snapshot_serializes_with_field_names() {
        let s = PopulationSnapshot::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let v = serde_json::to_value(s).unwrap();
        for c in Category::ALL {
            assert!(v.get(c.as_str()).is_some(), "missing {}", c);
        }
    }
}
