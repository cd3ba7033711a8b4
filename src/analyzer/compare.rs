use crate::analyzer::aggregate;
use crate::catalog::IndicatorCatalog;
use crate::error::DataError;
use crate::model::{CentralTendency, ComparisonResult, ComparisonRow, Dataset};

/// One requested comparison column: which indicator, and which city
/// baseline to compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonKey {
    pub indicator: String,
    pub central: CentralTendency,
}

impl ComparisonKey {
    pub fn mean(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            central: CentralTendency::Mean,
        }
    }

    pub fn median(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            central: CentralTendency::Median,
        }
    }

    /// Uses the catalog policy for the key (income compares against the
    /// city median, everything else against the mean).
    pub fn from_catalog(indicator: impl Into<String>) -> Self {
        let indicator = indicator.into();
        let central = IndicatorCatalog::central_for(&indicator);
        Self { indicator, central }
    }
}

impl From<&str> for ComparisonKey {
    fn from(indicator: &str) -> Self {
        Self::mean(indicator)
    }
}

/// Compares one tract against the city baseline for each requested key.
///
/// All keys are validated against the schema before anything is computed,
/// and the tract id must match a loaded tract exactly. Indicators where the
/// tract's own value is missing are dropped from the result; the remaining
/// rows keep the requested key order.
///
/// Division by zero is policy, not an error: a zero city baseline yields
/// `percent_delta = 0` and `normalized = 100`, so a downstream comparison
/// view keeps its constant city-average line at 100.
pub fn compare(
    dataset: &Dataset,
    tract_id: &str,
    keys: &[ComparisonKey],
) -> Result<ComparisonResult, DataError> {
    let columns: Vec<usize> = keys
        .iter()
        .map(|k| dataset.column_index(&k.indicator))
        .collect::<Result<_, _>>()?;
    let tract = dataset.tract(tract_id)?;

    let mut rows = Vec::with_capacity(keys.len());
    for (key, column) in keys.iter().zip(columns) {
        let Some(tract_value) = tract.value(column) else {
            continue;
        };
        let city = aggregate(dataset, &key.indicator)?;
        // The tract itself contributed a value, so the baseline exists.
        let Some(city_value) = city.central(key.central) else {
            continue;
        };

        let delta = tract_value - city_value;
        let (percent_delta, normalized) = if city_value != 0.0 {
            (delta / city_value * 100.0, tract_value / city_value * 100.0)
        } else {
            (0.0, 100.0)
        };

        rows.push(ComparisonRow {
            indicator: key.indicator.clone(),
            tract_value,
            city_value,
            delta,
            percent_delta,
            normalized,
        });
    }

    Ok(ComparisonResult {
        tract_id: tract_id.to_string(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tract;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn dataset() -> Dataset {
        // poverty_rate mean = 20; income median = 30000; flat_zero mean = 0
        Dataset::new(
            vec![
                "poverty_rate".into(),
                "median_household_income_econ".into(),
                "flat_zero".into(),
            ],
            vec![
                Tract::new("000001", vec![Some(10.0), Some(20000.0), Some(0.0)]),
                Tract::new("000002", vec![Some(20.0), Some(30000.0), Some(0.0)]),
                Tract::new("000003", vec![Some(30.0), Some(45000.0), Some(0.0)]),
            ],
        )
    }

    #[test]
    fn above_average_tract() {
        let result = compare(&dataset(), "000003", &[ComparisonKey::mean("poverty_rate")]).unwrap();
        let row = &result.rows[0];
        assert!(close(row.city_value, 20.0));
        assert!(close(row.delta, 10.0));
        assert!(close(row.percent_delta, 50.0));
        assert!(close(row.normalized, 150.0));
    }

    #[test]
    fn tract_at_city_mean_sits_on_the_baseline() {
        let ds = Dataset::new(
            vec!["poverty_rate".into(), "uninsured_rate".into()],
            vec![Tract::new("000001", vec![Some(18.0), Some(9.5)])],
        );
        let result = compare(
            &ds,
            "000001",
            &[
                ComparisonKey::mean("poverty_rate"),
                ComparisonKey::mean("uninsured_rate"),
            ],
        )
        .unwrap();
        assert_eq!(result.rows.len(), 2);
        for row in &result.rows {
            assert!(close(row.delta, 0.0));
            assert!(close(row.percent_delta, 0.0));
            assert!(close(row.normalized, 100.0));
        }
    }

    #[test]
    fn zero_city_baseline_never_divides() {
        let result = compare(&dataset(), "000002", &[ComparisonKey::mean("flat_zero")]).unwrap();
        let row = &result.rows[0];
        assert!(close(row.percent_delta, 0.0));
        assert!(close(row.normalized, 100.0));
    }

    #[test]
    fn income_uses_city_median() {
        let result = compare(
            &dataset(),
            "000003",
            &[ComparisonKey::from_catalog("median_household_income_econ")],
        )
        .unwrap();
        let row = &result.rows[0];
        // Median is 30000; the mean (31666.67) must not leak in.
        assert!(close(row.city_value, 30000.0));
        assert!(close(row.delta, 15000.0));
        assert!(close(row.percent_delta, 50.0));
    }

    #[test]
    fn missing_tract_values_are_omitted_in_order() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                Tract::new("000001", vec![Some(1.0), None, Some(3.0)]),
                Tract::new("000002", vec![Some(2.0), Some(5.0), Some(6.0)]),
            ],
        );
        let result = compare(
            &ds,
            "000001",
            &[
                ComparisonKey::mean("c"),
                ComparisonKey::mean("b"),
                ComparisonKey::mean("a"),
            ],
        )
        .unwrap();
        let order: Vec<&str> = result.rows.iter().map(|r| r.indicator.as_str()).collect();
        assert_eq!(order, ["c", "a"]);
    }

    #[test]
    fn unknown_tract_and_indicator_fail() {
        assert!(matches!(
            compare(&dataset(), "000099", &[ComparisonKey::mean("poverty_rate")]),
            Err(DataError::UnknownTract(_))
        ));
        assert!(matches!(
            compare(&dataset(), "000001", &[ComparisonKey::mean("nope")]),
            Err(DataError::UnknownIndicator(_))
        ));
    }
}
