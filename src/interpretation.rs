// 📖 Interpretation Tables - Rules as Data
// Number → descriptive text, one methodology per deployment

use crate::chart::NumerologyChart;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// ============================================================================
// INTERPRETATION ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub summary: String,
}

impl Interpretation {
    fn new(number: u32, title: &str, keywords: &[&str], summary: &str) -> Self {
        Interpretation {
            number,
            title: title.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            summary: summary.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Methodology {
    /// Built-in table
    #[default]
    Pythagorean,
    /// Table loaded from a JSON file
    Custom,
}

/// File layout accepted by `InterpretationTable::from_file`
#[derive(Debug, Deserialize)]
struct TableFile {
    methodology: String,
    entries: Vec<Interpretation>,
}

/// One aspect of a chart paired with its text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartReading {
    pub aspect: &'static str,
    pub number: u32,
    pub interpretation: Option<Interpretation>,
}

// ============================================================================
// INTERPRETATION TABLE
// ============================================================================

/// Immutable lookup table. Tables from different methodologies are never
/// merged; a deployment picks exactly one.
#[derive(Debug, Clone)]
pub struct InterpretationTable {
    methodology: String,
    entries: BTreeMap<u32, Interpretation>,
}

impl InterpretationTable {
    /// Build from entries (later duplicates of a number win)
    pub fn from_entries(methodology: &str, entries: Vec<Interpretation>) -> Self {
        InterpretationTable {
            methodology: methodology.to_string(),
            entries: entries.into_iter().map(|e| (e.number, e)).collect(),
        }
    }

    /// Load a table from JSON: `{"methodology": "...", "entries": [...]}`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read interpretations file: {:?}", path.as_ref()))?;

        let file: TableFile =
            serde_json::from_str(&content).context("Failed to parse interpretations JSON")?;

        tracing::info!(
            methodology = %file.methodology,
            entries = file.entries.len(),
            "interpretation table loaded"
        );

        Ok(InterpretationTable::from_entries(&file.methodology, file.entries))
    }

    pub fn pythagorean() -> Self {
        InterpretationTable::from_entries(
            "pythagorean",
            vec![
                Interpretation::new(1, "The Pioneer", &["initiative", "independence", "leadership"],
                    "Starts things. Drive to act alone and open new ground."),
                Interpretation::new(2, "The Diplomat", &["cooperation", "sensitivity", "partnership"],
                    "Works through others. Patience, tact and a talent for mediation."),
                Interpretation::new(3, "The Communicator", &["expression", "creativity", "sociability"],
                    "Speaks, writes, performs. Optimism that needs an outlet."),
                Interpretation::new(4, "The Builder", &["order", "work", "stability"],
                    "Method and persistence. Builds slowly and solidly, can turn rigid."),
                Interpretation::new(5, "The Explorer", &["freedom", "change", "curiosity"],
                    "Restless and adaptable. Learns by experience and movement."),
                Interpretation::new(6, "The Caretaker", &["family", "responsibility", "harmony"],
                    "Home, service and beauty. Carries others, sometimes too far."),
                Interpretation::new(7, "The Seeker", &["analysis", "introspection", "spirituality"],
                    "Looks beneath the surface. Needs solitude to think."),
                Interpretation::new(8, "The Executive", &["power", "ambition", "material success"],
                    "Organizes resources and people. Authority that must stay fair."),
                Interpretation::new(9, "The Humanitarian", &["compassion", "completion", "generosity"],
                    "Broad vision and endings that make room for what comes next."),
                Interpretation::new(11, "The Illuminator", &["intuition", "inspiration", "idealism"],
                    "Master number. Heightened sensitivity that inspires others."),
                Interpretation::new(22, "The Master Builder", &["vision", "execution", "legacy"],
                    "Master number. Turns large ideals into concrete structures."),
                Interpretation::new(33, "The Master Teacher", &["service", "healing", "devotion"],
                    "Master number. Love expressed as guidance and care."),
            ],
        )
    }

    pub fn methodology(&self) -> &str {
        &self.methodology
    }

    pub fn get(&self, number: u32) -> Option<&Interpretation> {
        self.entries.get(&number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Readings for the core chart numbers. A 0 (no name signal) has no text.
    pub fn describe_chart(&self, chart: &NumerologyChart) -> Vec<ChartReading> {
        [
            ("destiny", chart.destiny),
            ("motivation", chart.motivation),
            ("inner_self", chart.inner_self),
            ("expression", chart.expression),
            ("merit", chart.merit),
            ("personal_year", chart.current.personal_year),
            ("personal_month", chart.personal_month),
        ]
        .into_iter()
        .map(|(aspect, number)| ChartReading {
            aspect,
            number,
            interpretation: self.get(number).cloned(),
        })
        .collect()
    }
}

impl Default for InterpretationTable {
    fn default() -> Self {
        Self::pythagorean()
    }
}

// ============================================================================
// TESTS
// ============================================================================
