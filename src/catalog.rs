//! Static indicator catalog: key → display label, category, unit and the
//! central-tendency policy used for city-wide baselines.

use crate::model::CentralTendency;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Economic,
    Health,
    Education,
    Housing,
    Transportation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Percent,
    Currency,
    Index,
    Count,
}

impl Unit {
    /// Formats a raw value the way the dashboard metric cards show it.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Unit::Percent => format!("{value:.1}%"),
            Unit::Currency => format!("${}", group_thousands(value.round() as i64)),
            Unit::Index => format!("{value:.3}"),
            Unit::Count => group_thousands(value.round() as i64),
        }
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub unit: Unit,
    /// Baseline statistic for tract-vs-city comparisons. Income is compared
    /// against the city median; everything else against the mean.
    pub central: CentralTendency,
}

const fn mean_indicator(
    key: &'static str,
    label: &'static str,
    category: Category,
    unit: Unit,
) -> IndicatorDescriptor {
    IndicatorDescriptor {
        key,
        label,
        category,
        unit,
        central: CentralTendency::Mean,
    }
}

static INDICATORS: &[IndicatorDescriptor] = &[
    mean_indicator(
        "poverty_rate",
        "Poverty Rate",
        Category::Economic,
        Unit::Percent,
    ),
    mean_indicator(
        "unemployment_rate",
        "Unemployment Rate",
        Category::Economic,
        Unit::Percent,
    ),
    IndicatorDescriptor {
        key: "median_household_income_econ",
        label: "Median Household Income",
        category: Category::Economic,
        unit: Unit::Currency,
        central: CentralTendency::Median,
    },
    mean_indicator(
        "gini_index",
        "Gini Index (Income Inequality)",
        Category::Economic,
        Unit::Index,
    ),
    mean_indicator(
        "snap_participation_rate",
        "SNAP Participation Rate",
        Category::Economic,
        Unit::Percent,
    ),
    mean_indicator(
        "public_assistance_rate",
        "Public Assistance Rate",
        Category::Economic,
        Unit::Percent,
    ),
    mean_indicator(
        "housing_cost_burden_rate",
        "Housing Cost Burden Rate",
        Category::Housing,
        Unit::Percent,
    ),
    mean_indicator(
        "home_ownership_rate",
        "Home Ownership Rate",
        Category::Housing,
        Unit::Percent,
    ),
    mean_indicator(
        "vacancy_rate",
        "Vacancy Rate",
        Category::Housing,
        Unit::Percent,
    ),
    mean_indicator(
        "uninsured_rate",
        "Uninsured Rate",
        Category::Health,
        Unit::Percent,
    ),
    mean_indicator(
        "disability_rate",
        "Disability Rate",
        Category::Health,
        Unit::Percent,
    ),
    mean_indicator(
        "college_degree_rate",
        "College Degree Rate",
        Category::Education,
        Unit::Percent,
    ),
    mean_indicator(
        "long_commute_rate",
        "Long Commute Rate (60+ min)",
        Category::Transportation,
        Unit::Percent,
    ),
];

/// The fixed indicator set shown on the tract-vs-city radar comparison.
pub static COMPARISON_SET: &[&str] = &[
    "poverty_rate",
    "unemployment_rate",
    "snap_participation_rate",
    "housing_cost_burden_rate",
    "uninsured_rate",
    "college_degree_rate",
];

/// Read-only view over the built-in indicator descriptors.
pub struct IndicatorCatalog;

impl IndicatorCatalog {
    pub fn all() -> &'static [IndicatorDescriptor] {
        INDICATORS
    }

    pub fn get(key: &str) -> Option<&'static IndicatorDescriptor> {
        INDICATORS.iter().find(|d| d.key == key)
    }

    pub fn by_category(category: Category) -> impl Iterator<Item = &'static IndicatorDescriptor> {
        INDICATORS.iter().filter(move |d| d.category == category)
    }

    /// Central-tendency policy for a key; unknown keys fall back to mean.
    pub fn central_for(key: &str) -> CentralTendency {
        Self::get(key).map(|d| d.central).unwrap_or_default()
    }
}
