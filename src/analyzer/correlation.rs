use crate::error::DataError;
use crate::model::{Correlation, CorrelationTier, Dataset};

/// Pearson correlation between two indicator columns.
///
/// Pairwise complete-case: only tracts with both values present
/// participate, regardless of gaps in other columns. Fails with
/// [`DataError::InsufficientData`] when fewer than two pairs exist or when
/// either column has zero variance over the paired rows; a NaN coefficient
/// is never returned.
pub fn correlate(dataset: &Dataset, key_x: &str, key_y: &str) -> Result<Correlation, DataError> {
    let col_x = dataset.column_index(key_x)?;
    let col_y = dataset.column_index(key_y)?;

    let pairs: Vec<(f64, f64)> = dataset
        .tracts()
        .iter()
        .filter_map(|t| Some((t.value(col_x)?, t.value(col_y)?)))
        .collect();

    if pairs.len() < 2 {
        return Err(DataError::InsufficientData(format!(
            "{} paired observations for `{key_x}` vs `{key_y}`",
            pairs.len()
        )));
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let numerator: f64 = pairs
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let var_x: f64 = pairs.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let var_y: f64 = pairs.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let denominator = (var_x * var_y).sqrt();

    if denominator == 0.0 {
        return Err(DataError::InsufficientData(format!(
            "zero variance between `{key_x}` and `{key_y}`"
        )));
    }

    let coefficient = numerator / denominator;
    Ok(Correlation {
        coefficient,
        tier: CorrelationTier::classify(coefficient),
        pairs: pairs.len(),
    })
}
