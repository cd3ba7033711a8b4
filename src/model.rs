// Core structs: Tract, Dataset, AggregateResult, ComparisonResult
use crate::error::DataError;
use serde::Deserialize;
use std::collections::HashMap;

/// Tract codes are numeric, displayed zero-padded to this width.
pub const TRACT_ID_WIDTH: usize = 6;

/// One row of the dataset: a tract code plus one value slot per indicator,
/// aligned with the owning dataset's schema. A `None` slot is a missing
/// measurement, distinct from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Tract {
    id: String,
    values: Vec<Option<f64>>,
}

impl Tract {
    pub fn new(id: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value in the given schema column, `None` when missing.
    pub fn value(&self, column: usize) -> Option<f64> {
        self.values.get(column).copied().flatten()
    }

    /// Human-facing label, e.g. `Tract 000123`.
    pub fn display_label(&self) -> String {
        format!("Tract {}", self.id)
    }

    fn width(&self) -> usize {
        self.values.len()
    }
}

/// An ordered collection of tracts sharing one indicator schema.
///
/// Loaded once per session and never mutated; every analysis function takes
/// it by shared reference and computes a fresh derived snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Vec<String>,
    columns: HashMap<String, usize>,
    tracts: Vec<Tract>,
}

impl Dataset {
    /// Builds a dataset from a schema and rows aligned with it.
    ///
    /// Every tract must carry exactly one value slot per schema column;
    /// the loader guarantees this for file-backed datasets.
    pub fn new(schema: Vec<String>, tracts: Vec<Tract>) -> Self {
        debug_assert!(tracts.iter().all(|t| t.width() == schema.len()));
        let columns = schema
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i))
            .collect();
        Self {
            schema,
            columns,
            tracts,
        }
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn tracts(&self) -> &[Tract] {
        &self.tracts
    }

    pub fn len(&self) -> usize {
        self.tracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracts.is_empty()
    }

    /// Schema position of an indicator key.
    pub fn column_index(&self, key: &str) -> Result<usize, DataError> {
        self.columns
            .get(key)
            .copied()
            .ok_or_else(|| DataError::UnknownIndicator(key.to_string()))
    }

    /// Looks up a tract by its zero-padded code (exact match).
    pub fn tract(&self, tract_id: &str) -> Result<&Tract, DataError> {
        self.tracts
            .iter()
            .find(|t| t.id == tract_id)
            .ok_or_else(|| DataError::UnknownTract(tract_id.to_string()))
    }

    /// Non-missing values of one indicator column, in row order.
    pub fn column_values(&self, key: &str) -> Result<Vec<f64>, DataError> {
        let col = self.column_index(key)?;
        Ok(self.tracts.iter().filter_map(|t| t.value(col)).collect())
    }
}

/// Which central tendency stands in for "the city" on a given indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralTendency {
    #[default]
    Mean,
    Median,
}

/// Summary statistics over the non-missing values of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// City-wide aggregate for one indicator.
///
/// `summary` is `None` when every value in the column is missing; a column
/// with no data has no statistics, not zeroes.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub indicator: String,
    pub count: usize,
    pub summary: Option<Summary>,
}

impl AggregateResult {
    /// The city baseline under the given central-tendency policy.
    pub fn central(&self, tendency: CentralTendency) -> Option<f64> {
        self.summary.map(|s| match tendency {
            CentralTendency::Mean => s.mean,
            CentralTendency::Median => s.median,
        })
    }
}

/// One indicator's tract-vs-city comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub indicator: String,
    pub tract_value: f64,
    pub city_value: f64,
    pub delta: f64,
    pub percent_delta: f64,
    /// Tract value rescaled so the city baseline sits at 100.
    pub normalized: f64,
}

/// Ordered comparison rows for one tract, following the requested key order.
/// Indicators where the tract's own value is missing are omitted entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub tract_id: String,
    pub rows: Vec<ComparisonRow>,
}

/// Strength tier for a Pearson coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationTier {
    Strong,
    Moderate,
    Weak,
}

impl CorrelationTier {
    /// `|r| > 0.7` is strong, `0.4 < |r| <= 0.7` moderate, the rest weak.
    /// Boundaries are strict: exactly 0.7 is moderate, exactly 0.4 weak.
    pub fn classify(coefficient: f64) -> Self {
        let r = coefficient.abs();
        if r > 0.7 {
            Self::Strong
        } else if r > 0.4 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Pearson correlation between two indicator columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub coefficient: f64,
    pub tier: CorrelationTier,
    /// Number of tracts with both values present.
    pub pairs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_strict() {
        assert_eq!(CorrelationTier::classify(0.71), CorrelationTier::Strong);
        assert_eq!(CorrelationTier::classify(0.70), CorrelationTier::Moderate);
        assert_eq!(CorrelationTier::classify(-0.70), CorrelationTier::Moderate);
        assert_eq!(CorrelationTier::classify(0.40), CorrelationTier::Weak);
        assert_eq!(CorrelationTier::classify(-0.95), CorrelationTier::Strong);
        assert_eq!(CorrelationTier::classify(0.0), CorrelationTier::Weak);
    }

    #[test]
    fn tract_display_label_keeps_padding() {
        let tract = Tract::new("000123", vec![Some(1.0)]);
        assert_eq!(tract.display_label(), "Tract 000123");
    }

    #[test]
    fn dataset_lookup_errors() {
        let ds = Dataset::new(
            vec!["poverty_rate".into()],
            vec![Tract::new("000100", vec![Some(12.0)])],
        );
        assert!(matches!(
            ds.column_index("no_such_indicator"),
            Err(DataError::UnknownIndicator(_))
        ));
        assert!(matches!(
            ds.tract("999999"),
            Err(DataError::UnknownTract(_))
        ));
    }
}
