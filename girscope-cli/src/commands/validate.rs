use std::path::{Path, PathBuf};

use girscope::{Typelib, ValidationConfig};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::validation_level,
    output::{print_output, render, table},
};

#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub path: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub level: String,
    pub results: Vec<ValidationResult>,
}

fn validate_file(path: &Path, config: &ValidationConfig) -> ValidationResult {
    let (valid, error_kind, error_message) = match Typelib::from_file_with_config(path, config) {
        Ok(_) => (true, None, None),
        Err(e) => {
            let message = e.message().map_or_else(|| e.to_string(), str::to_string);
            (false, Some(e.kind().to_string()), Some(message))
        }
    };

    ValidationResult {
        path: path.display().to_string(),
        valid,
        error_kind,
        error_message,
    }
}

pub fn run(paths: &[PathBuf], level: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let config = validation_level(level)?;

    let results: Vec<ValidationResult> = paths
        .par_iter()
        .map(|path| validate_file(path, &config))
        .collect();

    let failed = results.iter().filter(|result| !result.valid).count();
    log::debug!("{} of {} typelibs failed validation", failed, results.len());

    let report = ValidationReport {
        level: level.to_string(),
        results,
    };

    print_output(&report, opts, |report| {
        println!("Validation level: {}\n", report.level);

        let mut rows = table(&["Status", "File", "Error"], &[]);
        for result in &report.results {
            let error = match (&result.error_kind, &result.error_message) {
                (Some(kind), Some(message)) => format!("{kind}: {message}"),
                _ => String::new(),
            };
            rows.add_row(vec![
                if result.valid { "PASS" } else { "FAIL" }.to_string(),
                result.path.clone(),
                error,
            ]);
        }
        println!("{}", render(&rows));
    })?;

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
