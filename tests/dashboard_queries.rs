//! The dashboard's query path end to end: load a CSV, aggregate, compare a
//! tract against the city, correlate two indicators.

use std::fs;
use std::path::PathBuf;
use tractlens::{
    aggregate, compare, correlate, ComparisonKey, CorrelationTier, DatasetLoader, COMPARISON_SET,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn write_city_csv(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tractlens-city-{}-{}.csv",
        name,
        std::process::id()
    ));
    // Four tracts; uninsured_rate tracks poverty_rate perfectly, one
    // income cell missing.
    let table = "\
tract,poverty_rate,unemployment_rate,snap_participation_rate,housing_cost_burden_rate,uninsured_rate,college_degree_rate,median_household_income_econ
100,10.0,4.0,8.0,25.0,5.0,40.0,60000
200,20.0,6.0,16.0,30.0,10.0,30.0,45000
300,30.0,8.0,24.0,35.0,15.0,20.0,30000
400,40.0,10.0,32.0,40.0,20.0,10.0,NA
";
    fs::write(&path, table).unwrap();
    path
}

#[test]
fn radar_comparison_over_loaded_dataset() {
    let path = write_city_csv("radar");
    let dataset = DatasetLoader::load(&path).unwrap();

    let keys: Vec<ComparisonKey> = COMPARISON_SET
        .iter()
        .map(|k| ComparisonKey::from_catalog(*k))
        .collect();
    let result = compare(&dataset, "000300", &keys).unwrap();

    // Every comparison indicator present for this tract.
    assert_eq!(result.rows.len(), COMPARISON_SET.len());
    let order: Vec<&str> = result.rows.iter().map(|r| r.indicator.as_str()).collect();
    assert_eq!(order, COMPARISON_SET);

    // poverty_rate: 30 against a city mean of 25.
    let poverty = &result.rows[0];
    assert!(close(poverty.city_value, 25.0));
    assert!(close(poverty.delta, 5.0));
    assert!(close(poverty.percent_delta, 20.0));
    assert!(close(poverty.normalized, 120.0));

    fs::remove_file(path).unwrap();
}

#[test]
fn income_comparison_ignores_missing_cells() {
    let path = write_city_csv("income");
    let dataset = DatasetLoader::load(&path).unwrap();

    // City median income over the three non-missing values is 45000.
    let agg = aggregate(&dataset, "median_household_income_econ").unwrap();
    assert_eq!(agg.count, 3);
    assert!(close(agg.summary.unwrap().median, 45000.0));

    let result = compare(
        &dataset,
        "000100",
        &[ComparisonKey::from_catalog("median_household_income_econ")],
    )
    .unwrap();
    let row = &result.rows[0];
    assert!(close(row.city_value, 45000.0));
    assert!(close(row.delta, 15000.0));

    // The tract with the missing cell contributes no row at all.
    let gap = compare(
        &dataset,
        "000400",
        &[ComparisonKey::from_catalog("median_household_income_econ")],
    )
    .unwrap();
    assert!(gap.rows.is_empty());

    fs::remove_file(path).unwrap();
}

#[test]
fn correlation_over_loaded_dataset() {
    let path = write_city_csv("corr");
    let dataset = DatasetLoader::load(&path).unwrap();

    let corr = correlate(&dataset, "poverty_rate", "uninsured_rate").unwrap();
    assert!(close(corr.coefficient, 1.0));
    assert_eq!(corr.tier, CorrelationTier::Strong);
    assert_eq!(corr.pairs, 4);

    // Income has one gap; pairwise complete-case keeps the other three.
    let income = correlate(&dataset, "poverty_rate", "median_household_income_econ").unwrap();
    assert_eq!(income.pairs, 3);
    assert!(income.coefficient < 0.0);

    fs::remove_file(path).unwrap();
}
