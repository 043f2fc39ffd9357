use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use blog_e2e::{config::HarnessConfig, report, runner::ScenarioRunner, scenario, session};

#[derive(Parser)]
#[command(name = "blog-e2e")]
#[command(version = "0.1.0")]
#[command(about = "End-to-end browser checks for the blog web app", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenario suite against a live deployment
    Run {
        /// Base URL of the deployment under test. Falls back to
        /// BLOG_E2E_BASE_URL, then http://localhost:3000.
        #[arg(short, long)]
        base_url: Option<String>,

        /// Show the browser window instead of running headless
        #[arg(long, default_value = "false")]
        headed: bool,

        /// Output directory for results and reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Also write an HTML report next to the results
        #[arg(long, default_value = "false")]
        report: bool,

        /// Only run scenarios whose name contains this substring
        #[arg(short, long)]
        filter: Option<String>,

        /// Abort the whole run after this many seconds
        #[arg(long)]
        run_timeout: Option<u64>,
    },

    /// Generate report from saved test results
    Report {
        /// Path to test results JSON
        results: PathBuf,

        /// Output format (json, html)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the scenarios in the suite
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            base_url,
            headed,
            output,
            report: with_report,
            filter,
            run_timeout,
        } => {
            let mut scenarios = scenario::catalogue();
            if let Some(ref needle) = filter {
                scenarios.retain(|s| s.name.contains(needle.as_str()));
                if scenarios.is_empty() {
                    anyhow::bail!("no scenario name contains {:?}", needle);
                }
            }

            // The flag wins over the BLOG_E2E_BASE_URL fallback read by
            // HarnessConfig::default.
            let mut harness_config = HarnessConfig::default();
            if let Some(ref base) = base_url {
                harness_config = harness_config.with_base_url(base);
            }

            println!(
                "{} Running {} scenarios against: {}",
                "▶".green().bold(),
                scenarios.len(),
                harness_config.base_url.cyan()
            );
            println!("  Output: {}", output.display().to_string().cyan());
            if headed {
                println!("  Browser: {}", "headed".yellow());
            }
            if with_report {
                println!("  Reports: {}", "Enabled".green());
            }
            if let Some(ref needle) = filter {
                println!("  Filter: {}", needle.cyan());
            }

            let mut session_config = session::SessionConfig::default();
            if headed {
                session_config.headless = false;
            }

            let runner = ScenarioRunner::new(
                Box::new(session::SessionManager::new(session_config)),
                harness_config,
            );

            let run = runner.run_all(&scenarios);
            let run_report = match run_timeout {
                Some(secs) => {
                    match tokio::time::timeout(Duration::from_secs(secs), run).await {
                        Ok(result) => result?,
                        Err(_) => {
                            eprintln!(
                                "{} Run exceeded the {}s budget, aborting",
                                "✗".red().bold(),
                                secs
                            );
                            std::process::exit(1);
                        }
                    }
                }
                None => run.await?,
            };

            let results = report::write_reports(run_report, &output, with_report).await?;
            if !results.summary.all_passed() {
                std::process::exit(1);
            }
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                results.display()
            );
            report::generate_report(&results, &format, output.as_deref()).await?;
        }

        Commands::List => {
            for s in scenario::catalogue() {
                println!("{:<28} {}", s.name.cyan(), s.description);
            }
        }
    }

    Ok(())
}
