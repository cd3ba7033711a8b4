use crate::error::DataError;
use crate::model::{AggregateResult, Dataset, Summary};
use std::cmp::Ordering;

/// Computes city-wide summary statistics for one indicator column.
///
/// Missing values are excluded from every statistic; `count` is the number
/// of tracts that contributed. When the whole column is missing the summary
/// is `None` rather than a block of zeroes. Standard deviation uses the
/// sample (n−1) formula; with a single observation it is reported as 0.
/// The result depends only on the multiset of non-missing values, never on
/// row order.
pub fn aggregate(dataset: &Dataset, indicator: &str) -> Result<AggregateResult, DataError> {
    let mut values = dataset.column_values(indicator)?;
    let count = values.len();
    if count == 0 {
        return Ok(AggregateResult {
            indicator: indicator.to_string(),
            count: 0,
            summary: None,
        });
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = if count < 2 {
        0.0
    } else {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };

    Ok(AggregateResult {
        indicator: indicator.to_string(),
        count,
        summary: Some(Summary {
            mean,
            median: median_of_sorted(&values),
            min: values[0],
            max: values[count - 1],
            std_dev,
        }),
    })
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
