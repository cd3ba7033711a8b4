//! Post-run validation: generated files exist and the integrated table has
//! the expected tract count.

use crate::config::AppConfig;
use crate::loader::DatasetLoader;
use crate::pipeline::progress;

#[derive(Debug, Clone)]
pub struct ValidationCheck {
    pub description: String,
    pub passed: bool,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Runs every validation check, printing one tagged line per check and a
/// final `N/M checks passed` summary. Never short-circuits; all checks run
/// so the report shows the full picture.
pub fn run_validation(config: &AppConfig) -> ValidationReport {
    progress::info("Running validation checks...");

    let mut checks = Vec::new();

    for file in &config.validation_files {
        let passed = file.exists();
        if passed {
            progress::ok(format!("Output file exists: {}", file.display()));
        } else {
            progress::error(format!("Output file missing: {}", file.display()));
        }
        checks.push(ValidationCheck {
            description: format!("exists: {}", file.display()),
            passed,
        });
    }

    checks.push(check_tract_count(config));

    let report = ValidationReport { checks };
    println!();
    progress::info(format!(
        "Validation: {}/{} checks passed",
        report.passed(),
        report.total()
    ));
    report
}

fn check_tract_count(config: &AppConfig) -> ValidationCheck {
    let description = format!("{} tracts in integrated table", config.expected_tracts);
    let passed = match DatasetLoader::load(&config.dataset_path) {
        Ok(dataset) => {
            if dataset.len() == config.expected_tracts {
                progress::ok(format!(
                    "Integrated data has correct number of tracts: {}",
                    config.expected_tracts
                ));
                true
            } else {
                progress::warn(format!(
                    "Expected {} tracts, found {}",
                    config.expected_tracts,
                    dataset.len()
                ));
                false
            }
        }
        Err(e) => {
            progress::warn(format!("Could not validate data completeness: {e}"));
            false
        }
    };
    ValidationCheck {
        description,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tractlens-validate-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config_for(dir: &std::path::Path, rows: usize) -> AppConfig {
        let dataset = dir.join("integrated.csv");
        let mut table = String::from("tract,poverty_rate\n");
        for i in 0..rows {
            table.push_str(&format!("{},{}.0\n", i + 1, i + 10));
        }
        fs::write(&dataset, table).unwrap();

        let side_file = dir.join("dashboard.html");
        fs::write(&side_file, "<html></html>").unwrap();

        let mut config = AppConfig::default();
        config.dataset_path = dataset.clone();
        config.validation_files = vec![dataset, side_file];
        config.expected_tracts = 3;
        config
    }

    #[test]
    fn all_checks_pass_with_complete_outputs() {
        let dir = temp_dir("pass");
        let config = config_for(&dir, 3);
        let report = run_validation(&config);
        assert_eq!(report.total(), 3);
        assert!(report.all_passed());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn wrong_row_count_fails_only_that_check() {
        let dir = temp_dir("count");
        let config = config_for(&dir, 5);
        let report = run_validation(&config);
        assert_eq!(report.passed(), 2);
        assert!(!report.all_passed());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_files_are_reported_individually() {
        let dir = temp_dir("missing");
        let mut config = config_for(&dir, 3);
        config
            .validation_files
            .push(dir.join("never-written.csv"));
        let report = run_validation(&config);
        assert_eq!(report.total(), 4);
        assert_eq!(report.passed(), 3);
        fs::remove_dir_all(dir).unwrap();
    }
}
