use crate::pipeline::{StepPhase, StepSpec};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default per-step timeout (5 minutes).
pub const DEFAULT_STEP_TIMEOUT_SECONDS: u64 = 300;

/// Number of census tracts the integrated table must contain.
pub const DEFAULT_EXPECTED_TRACTS: usize = 199;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// The integrated table consumed by the dashboard core.
    pub dataset_path: PathBuf,
    #[serde(default = "default_step_timeout")]
    pub step_timeout_seconds: u64,
    #[serde(default = "default_expected_tracts")]
    pub expected_tracts: usize,
    /// Files whose existence the validation phase checks.
    pub validation_files: Vec<PathBuf>,
    pub steps: Vec<StepSpec>,
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
}

fn default_step_timeout() -> u64 {
    DEFAULT_STEP_TIMEOUT_SECONDS
}

fn default_expected_tracts() -> usize {
    DEFAULT_EXPECTED_TRACTS
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

impl AppConfig {
    /// The steps to run, honoring the skip-extraction flag.
    pub fn steps_to_run(&self, skip_extraction: bool) -> Vec<StepSpec> {
        self.steps
            .iter()
            .filter(|s| !(skip_extraction && s.phase == StepPhase::Extraction))
            .cloned()
            .collect()
    }
}

impl Default for AppConfig {
    /// The built-in Baltimore pipeline: two extraction scripts, one
    /// integration script, one dashboard generation script.
    fn default() -> Self {
        let health_file = "data/health_expanded/baltimore_health_35indicators_2022.csv";
        let econ_file = "data/economic/baltimore_economic_data_2022.csv";
        let integrated_file = "data/integrated/baltimore_integrated_health_economic_2022.csv";
        let dashboard_file = "output/dashboard_multi_year.html";

        let python_step = |script: &str, description: &str, output: &str, phase: StepPhase| {
            StepSpec {
                name: script.to_string(),
                description: description.to_string(),
                command: "python".to_string(),
                args: vec![script.to_string()],
                expected_outputs: vec![PathBuf::from(output)],
                phase,
            }
        };

        Self {
            dataset_path: PathBuf::from(integrated_file),
            step_timeout_seconds: DEFAULT_STEP_TIMEOUT_SECONDS,
            expected_tracts: DEFAULT_EXPECTED_TRACTS,
            validation_files: vec![
                PathBuf::from(health_file),
                PathBuf::from(econ_file),
                PathBuf::from(integrated_file),
                PathBuf::from(dashboard_file),
            ],
            steps: vec![
                python_step(
                    "expand_health_indicators.py",
                    "Expanding health indicators (4 -> 35)",
                    health_file,
                    StepPhase::Extraction,
                ),
                python_step(
                    "fetch_census_economic_data.py",
                    "Fetching economic indicators (24 metrics)",
                    econ_file,
                    StepPhase::Extraction,
                ),
                python_step(
                    "integrate_economic_data.py",
                    "Integrating health + economic data",
                    integrated_file,
                    StepPhase::Integration,
                ),
                python_step(
                    "Baltimore_MetricsWithMap.py",
                    "Generating health dashboard",
                    dashboard_file,
                    StepPhase::Generation,
                ),
            ],
            env_file: default_env_file(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
