use tokio::sync::broadcast;

use super::state::{Outcome, RunSummary};

/// Run execution events for real-time console updates.
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run_id: String,
        scenario_count: usize,
        base_url: String,
    },
    ScenarioStarted {
        name: String,
        description: String,
        index: usize,
        total: usize,
    },
    ScenarioFinished {
        name: String,
        outcome: Outcome,
        duration_ms: u64,
    },
    RunFinished {
        summary: RunSummary,
    },
}

/// Event emitter for broadcasting run events.
pub struct EventEmitter {
    sender: broadcast::Sender<RunEvent>,
}

impl EventEmitter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Emit to whoever listens; with no subscribers the event is dropped.
    pub fn emit(&self, event: RunEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.sender.subscribe()
    }
}

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration as StdDuration;

/// Console event listener printing a spinner while a scenario runs and a
/// marker line once it finishes.
pub struct ConsoleEventListener;

impl ConsoleEventListener {
    pub async fn listen(mut receiver: broadcast::Receiver<RunEvent>) {
        use colored::Colorize;
        use std::io::IsTerminal;

        let mut spinner: Option<ProgressBar> = None;

        while let Ok(event) = receiver.recv().await {
            match event {
                RunEvent::RunStarted {
                    run_id,
                    scenario_count,
                    base_url,
                } => {
                    println!(
                        "\n{} Run {} — {} scenarios against {}",
                        "▶".green().bold(),
                        run_id.cyan(),
                        scenario_count,
                        base_url.cyan()
                    );
                }

                RunEvent::ScenarioStarted {
                    name,
                    description,
                    index,
                    total,
                } => {
                    let pb = if std::io::stdout().is_terminal() {
                        ProgressBar::new_spinner()
                    } else {
                        ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
                    };
                    let style = ProgressStyle::default_spinner()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                        .template("  {spinner} {msg}")
                        .unwrap();
                    pb.set_style(style);
                    pb.set_message(format!(
                        "[{}/{}] {} — {}",
                        index + 1,
                        total,
                        name,
                        description.dimmed()
                    ));
                    pb.enable_steady_tick(StdDuration::from_millis(100));
                    spinner = Some(pb);
                }

                RunEvent::ScenarioFinished {
                    name,
                    outcome,
                    duration_ms,
                } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    match outcome {
                        Outcome::Passed => {
                            println!("  {} {} ({}ms)", "✓".green(), name, duration_ms);
                        }
                        Outcome::Failed { reason } => {
                            println!(
                                "  {} {} ({}ms)\n      {}",
                                "✗".red(),
                                name,
                                duration_ms,
                                reason.red()
                            );
                        }
                        Outcome::Errored { error } => {
                            println!(
                                "  {} {} ({}ms)\n      {}",
                                "⚠".yellow(),
                                name,
                                duration_ms,
                                error.yellow()
                            );
                        }
                    }
                }

                RunEvent::RunFinished { summary } => {
                    println!("\n{} Run finished", "■".blue().bold());
                    println!("  Total scenarios: {}", summary.total);
                    println!(
                        "  {} passed, {} failed, {} errored",
                        summary.passed.to_string().green(),
                        summary.failed.to_string().red(),
                        summary.errored.to_string().yellow()
                    );
                    if let Some(duration) = summary.total_duration_ms {
                        println!("  Duration: {}ms", duration);
                    }
                }
            }
        }
    }
}
