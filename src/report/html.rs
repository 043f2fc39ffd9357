use std::path::Path;

use anyhow::Result;

use super::types::TestResults;
use crate::runner::state::Outcome;

/// Write the results as a self-contained HTML page, to a file when `output`
/// is given and to stdout otherwise.
pub async fn generate(results: &TestResults, output: Option<&Path>) -> Result<()> {
    let html = render(results);

    if let Some(path) = output {
        std::fs::write(path, html)?;
        println!("HTML report saved to: {}", path.display());
    } else {
        println!("{}", html);
    }

    Ok(())
}

fn render(results: &TestResults) -> String {
    let summary = &results.summary;
    let pass_rate = if summary.total > 0 {
        (summary.passed as f64 / summary.total as f64 * 100.0) as u32
    } else {
        0
    };

    let mut rows = String::new();
    for scenario in &results.scenarios {
        let (icon, class, detail) = match &scenario.outcome {
            Outcome::Passed => ("✓", "passed", String::new()),
            Outcome::Failed { reason } => (
                "✗",
                "failed",
                format!(r#"<div class="detail">{}</div>"#, html_escape(reason)),
            ),
            Outcome::Errored { error } => (
                "⚠",
                "errored",
                format!(r#"<div class="detail">{}</div>"#, html_escape(error)),
            ),
        };

        let duration = scenario
            .duration_ms
            .map(|d| format!(r#"<span class="duration">{}</span>"#, format_duration(d)))
            .unwrap_or_default();

        rows.push_str(&format!(
            r#"
        <div class="scenario {class}">
            <div class="icon">{icon}</div>
            <div class="body">
                <div class="head">
                    <span class="name">{}</span>
                    {duration}
                </div>
                <div class="description">{}</div>
                {detail}
            </div>
        </div>"#,
            html_escape(&scenario.name),
            html_escape(&scenario.description),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Blog E2E Report - {run_id}</title>
    <style>
        :root {{
            --bg: #0b101c;
            --panel: #151c2c;
            --border: #2c3650;
            --text: #eef2f8;
            --muted: #93a0b5;
            --green: #10b981;
            --red: #ef4444;
            --yellow: #f59e0b;
        }}
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
            padding: 3rem 1rem;
        }}
        .container {{ max-width: 960px; margin: 0 auto; }}
        h1 {{ font-size: 1.75rem; margin-bottom: 0.25rem; }}
        .subtitle {{ color: var(--muted); margin-bottom: 2rem; font-size: 0.9rem; }}
        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
            gap: 1rem;
            margin-bottom: 1.5rem;
        }}
        .stat {{
            background: var(--panel);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            padding: 1rem 1.25rem;
        }}
        .stat .value {{ font-size: 2rem; font-weight: 700; }}
        .stat .label {{ color: var(--muted); font-size: 0.8rem; text-transform: uppercase; }}
        .stat.passed .value {{ color: var(--green); }}
        .stat.failed .value {{ color: var(--red); }}
        .stat.errored .value {{ color: var(--yellow); }}
        .progress {{
            background: var(--panel);
            border: 1px solid var(--border);
            border-radius: 6px;
            height: 10px;
            overflow: hidden;
            margin-bottom: 2.5rem;
        }}
        .progress .fill {{ height: 100%; background: var(--green); width: {pass_rate}%; }}
        .scenario {{
            background: var(--panel);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            padding: 1rem 1.25rem;
            margin-bottom: 0.75rem;
            display: flex;
            gap: 1rem;
            align-items: flex-start;
        }}
        .icon {{ font-size: 1.25rem; width: 1.5rem; text-align: center; }}
        .scenario.passed .icon {{ color: var(--green); }}
        .scenario.failed .icon {{ color: var(--red); }}
        .scenario.errored .icon {{ color: var(--yellow); }}
        .body {{ flex: 1; }}
        .head {{ display: flex; justify-content: space-between; align-items: baseline; }}
        .name {{ font-family: ui-monospace, monospace; font-weight: 600; }}
        .duration {{ color: var(--muted); font-size: 0.8rem; }}
        .description {{ color: var(--muted); font-size: 0.875rem; }}
        .detail {{
            margin-top: 0.5rem;
            padding: 0.6rem 0.8rem;
            border-radius: 0.5rem;
            background: rgba(239, 68, 68, 0.08);
            border: 1px solid rgba(239, 68, 68, 0.25);
            font-family: ui-monospace, monospace;
            font-size: 0.8rem;
            color: #fda4a4;
        }}
        .scenario.errored .detail {{
            background: rgba(245, 158, 11, 0.08);
            border-color: rgba(245, 158, 11, 0.25);
            color: #fcd34d;
        }}
        footer {{
            margin-top: 2.5rem;
            padding-top: 1.25rem;
            border-top: 1px solid var(--border);
            color: var(--muted);
            font-size: 0.8rem;
            display: flex;
            justify-content: space-between;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Blog E2E Report</h1>
        <div class="subtitle">Run {run_id} · {pass_rate}% passed · {total_duration}</div>
        <div class="summary">
            <div class="stat"><div class="value">{total}</div><div class="label">Scenarios</div></div>
            <div class="stat passed"><div class="value">{passed}</div><div class="label">Passed</div></div>
            <div class="stat failed"><div class="value">{failed}</div><div class="label">Failed</div></div>
            <div class="stat errored"><div class="value">{errored}</div><div class="label">Errored</div></div>
        </div>
        <div class="progress"><div class="fill"></div></div>
        {rows}
        <footer>
            <span>Run: {run_id}</span>
            <span>Generated: {generated_at}</span>
        </footer>
    </div>
</body>
</html>"#,
        run_id = html_escape(&results.run_id),
        pass_rate = pass_rate,
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored,
        total_duration = format_duration(summary.total_duration_ms.unwrap_or(0)),
        rows = rows,
        generated_at = html_escape(&results.generated_at),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {:.0}s", ms / 60_000, (ms % 60_000) as f64 / 1000.0)
    }
}
