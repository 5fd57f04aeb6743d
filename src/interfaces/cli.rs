// ============================================================
// CLI BOUNDARY
// ============================================================
// Read a file, enforce the size limit, run the analyzer

use std::path::PathBuf;

use clap::Parser;

use crate::application::use_cases::CsvAnalyzer;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::BoundaryConfig;
use crate::interfaces::report::render_text;

/// Analyze a CSV file and print descriptive statistics
#[derive(Parser, Debug)]
#[command(name = "csvscope", version, about)]
pub struct Cli {
    /// Path to the CSV file
    pub csv_path: PathBuf,

    /// Emit the analysis result as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Maximum input size in MB (overrides CSVSCOPE_MAX_INPUT_MB)
    #[arg(long)]
    pub max_size_mb: Option<u64>,
}

/// Run one analysis and return the rendered output.
///
/// The size limit is enforced here, before any bytes reach the core;
/// the analyzer itself is unbounded by design.
pub fn run(cli: &Cli) -> Result<String> {
    let mut config = BoundaryConfig::from_env();
    if let Some(limit) = cli.max_size_mb {
        config.max_input_mb = limit;
    }

    let metadata = std::fs::metadata(&cli.csv_path)?;
    if metadata.len() > config.max_input_bytes() {
        return Err(AppError::IoError(format!(
            "file is too large ({} bytes); maximum allowed size is {} MB",
            metadata.len(),
            config.max_input_mb
        )));
    }

    let bytes = std::fs::read(&cli.csv_path)?;
    let filename = cli
        .csv_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string());

    tracing::info!(
        file = %cli.csv_path.display(),
        size_bytes = bytes.len(),
        "Analyzing CSV file"
    );

    let result = CsvAnalyzer::new().analyze(&bytes, filename.as_deref())?;

    if cli.json {
        serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::Internal(format!("failed to serialize result: {}", e)))
    } else {
        Ok(render_text(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn cli_for(path: &std::path::Path) -> Cli {
        Cli {
            csv_path: path.to_path_buf(),
            json: false,
            max_size_mb: None,
        }
    }

    #[test]
    fn test_run_text_report() {
        let file = write_temp("a,b\n1,2\n3,4\n");
        let output = run(&cli_for(file.path())).unwrap();

        assert!(output.contains("# CSV Analysis"));
        assert!(output.contains("- Rows: 2"));
    }

    #[test]
    fn test_run_json_output() {
        let file = write_temp("a,b\n1,2\n3,4\n");
        let mut cli = cli_for(file.path());
        cli.json = true;
        let output = run(&cli).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["rows"], 2);
        assert_eq!(parsed["columns"], 2);
        assert_eq!(parsed["encoding"], "utf-8");
    }

    #[test]
    fn test_size_limit_enforced() {
        let file = write_temp("a,b\n1,2\n");
        let mut cli = cli_for(file.path());
        cli.max_size_mb = Some(0);
        let result = run(&cli);

        assert!(matches!(result, Err(AppError::IoError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let cli = cli_for(std::path::Path::new("/nonexistent/input.csv"));
        assert!(matches!(run(&cli), Err(AppError::IoError(_))));
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        let file = write_temp("");
        assert!(matches!(
            run(&cli_for(file.path())),
            Err(AppError::ParseError(_))
        ));
    }
}
