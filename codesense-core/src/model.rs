//! Typed form of the review-result payload.
//!
//! The payload is produced by an analysis step this crate knows nothing about,
//! so parsing is strict only where the report cannot be laid out without the
//! field (the metrics map and the three category scores). Per-item fields are
//! lenient: numbers and booleans print as text, anything else that is not a
//! string renders empty, a severity that is not a known label is `info`, and
//! a list entry that is not an object becomes an empty item. One malformed
//! finding never fails the whole report.

use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A complete review result, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// Metric name → score, in the order the producer wrote them.
    #[serde(deserialize_with = "ordered_metrics")]
    pub metrics: Vec<Metric>,
    pub structure_analysis: FindingCategory,
    pub implementation_review: FindingCategory,
    pub best_practices: FindingCategory,
    #[serde(default, deserialize_with = "lenient_items")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub corrections: Option<CorrectionSet>,
}

impl ReviewResult {
    /// Returns the finding group for `category`.
    pub fn category(&self, category: Category) -> &FindingCategory {
        match category {
            Category::Structure => &self.structure_analysis,
            Category::Implementation => &self.implementation_review,
            Category::BestPractices => &self.best_practices,
        }
    }

    /// Returns the correction set only when its `hasCorrections` gate is set.
    ///
    /// Callers that go through this never read `changes` or `correctedCode`
    /// of a gated-off set.
    pub fn available_corrections(&self) -> Option<&CorrectionSet> {
        self.corrections.as_ref().filter(|c| c.has_corrections)
    }
}

/// One named score in the metrics grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub name: String,
    /// Nominally 0–100; never clamped here.
    pub value: i64,
}

/// The three scored finding groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Structure,
    Implementation,
    BestPractices,
}

impl Category {
    pub const ALL: [Category; 3] =
        [Category::Structure, Category::Implementation, Category::BestPractices];

    /// Panel heading shown above the group.
    pub fn title(self) -> &'static str {
        match self {
            Category::Structure => "Structure Analysis",
            Category::Implementation => "Implementation Review",
            Category::BestPractices => "Best Practices",
        }
    }
}

/// A scored group of findings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FindingCategory {
    pub score: i64,
    #[serde(default, deserialize_with = "lenient_items")]
    pub findings: Vec<Finding>,
}

/// A single observation inside a category.
///
/// Producers disagree on whether the label is called `aspect` or `issue`;
/// both are kept and [`Finding::title`] picks one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Finding {
    #[serde(deserialize_with = "lenient_optional_text")]
    pub aspect: Option<String>,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub issue: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub explanation: String,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub recommendation: Option<String>,
    #[serde(deserialize_with = "lenient_severity")]
    pub severity: Severity,
}

impl Finding {
    /// The finding's label: `aspect` when present and non-empty, else `issue`,
    /// else the empty string.
    pub fn title(&self) -> &str {
        self.aspect
            .as_deref()
            .filter(|a| !a.is_empty())
            .or(self.issue.as_deref())
            .unwrap_or("")
    }

    /// The suggested fix, if there is a non-empty one.
    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref().filter(|r| !r.is_empty())
    }
}

/// Finding severity. Anything other than `error` or `warning` is `Info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    /// Maps a producer label onto a severity; unknown labels become `Info`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// A free-standing recommendation shown in the last report section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
}

/// Optional before/after code payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorrectionSet {
    pub has_corrections: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub corrected_code: String,
    #[serde(deserialize_with = "lenient_items")]
    pub changes: Vec<Change>,
}

/// One itemised edit inside a [`CorrectionSet`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Change {
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(deserialize_with = "lenient_text")]
    pub original: String,
    #[serde(deserialize_with = "lenient_text")]
    pub correction: String,
    #[serde(deserialize_with = "lenient_text")]
    pub explanation: String,
}

/// Reads the metrics object as an ordered list.
///
/// A repeated key keeps its first position and takes the last value, the
/// same outcome a JSON object lookup would give.
fn ordered_metrics<'de, D>(deserializer: D) -> Result<Vec<Metric>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MetricsVisitor;

    impl<'de> Visitor<'de> for MetricsVisitor {
        type Value = Vec<Metric>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping metric names to integer scores")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut metrics: Vec<Metric> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, value)) = map.next_entry::<String, i64>()? {
                match metrics.iter_mut().find(|m| m.name == name) {
                    Some(existing) => existing.value = value,
                    None => metrics.push(Metric { name, value }),
                }
            }
            Ok(metrics)
        }
    }

    deserializer.deserialize_map(MetricsVisitor)
}

/// Renders a scalar the way a template would print it: strings as-is,
/// numbers and booleans in their JSON spelling. `None` for null, arrays and
/// objects.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_severity<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(label) => Severity::from_label(&label),
        _ => Severity::default(),
    })
}

/// Reads a list of items, replacing any entry that is not a well-formed
/// object with `T::default()`. A list that is not an array reads as empty.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| T::deserialize(item).unwrap_or_default())
        .collect())
}
