pub mod html;
pub mod json;
pub mod types;

use std::path::Path;

use anyhow::Result;

use crate::runner::state::RunReport;
use types::TestResults;

/// Regenerate a report from a saved results file.
pub async fn generate_report(
    results_path: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(results_path)?;
    let results: TestResults = serde_json::from_str(&raw)?;

    match format {
        "json" => json::generate(&results, output).await,
        "html" => html::generate(&results, output).await,
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// Persist a finished run: the raw results document always, plus the HTML
/// report when requested. Returns the results so the caller can decide the
/// exit status.
pub async fn write_reports(
    report: RunReport,
    output_dir: &Path,
    with_html: bool,
) -> Result<TestResults> {
    std::fs::create_dir_all(output_dir)?;
    let results = TestResults::from_report(report);

    let results_path = output_dir.join("test-results.json");
    std::fs::write(&results_path, serde_json::to_string_pretty(&results)?)?;
    println!("Results saved to: {}", results_path.display());

    if with_html {
        html::generate(&results, Some(&output_dir.join("report.html"))).await?;
    }

    Ok(results)
}
