//! `routine`: build and print weekly class timetables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_timetable::config::AppConfig;
use u_timetable::report::{self, ReportTarget};
use u_timetable::roster::{Roster, RosterInput};
use u_timetable::scheduler::CoverageReport;
use u_timetable::validation::validate_roster;

#[derive(Parser, Debug)]
#[command(name = "routine", version, about = "Weekly class timetable builder")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the demo roster as a roster file.
    Sample,
    /// Check a roster file for problems that would cost schedule hours.
    Validate {
        /// Roster file (JSON).
        roster: PathBuf,
    },
    /// List the reports available for a roster.
    Targets {
        /// Roster file (JSON).
        roster: PathBuf,
    },
    /// Generate a timetable and print one report.
    Generate {
        /// Roster file (JSON).
        roster: PathBuf,
        /// Report to print: master, department:<code>, teacher:<id>, room:<name>.
        #[arg(short, long, default_value = "master")]
        report: String,
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Write the report to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Append a coverage summary.
        #[arg(long)]
        coverage: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => AppConfig::load(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(AppConfig::default()),
    }
}

fn load_roster(path: &Path) -> Result<Roster> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading roster {}", path.display()))?;
    let input: RosterInput = serde_json::from_str(&text)
        .with_context(|| format!("parsing roster {}", path.display()))?;
    let roster = input
        .build()
        .with_context(|| format!("applying roster {}", path.display()))?;
    info!(departments = roster.len(), "Roster loaded");
    Ok(roster)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(p) => fs::write(p, text).with_context(|| format!("writing {}", p.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Sample => {
            let json = serde_json::to_string_pretty(&Roster::sample_input())?;
            println!("{json}");
        }
        Command::Validate { roster } => {
            let roster = load_roster(&roster)?;
            match validate_roster(&roster, &config.grid) {
                Ok(()) => println!("Roster OK: {} departments", roster.len()),
                Err(issues) => {
                    for issue in &issues {
                        println!("{:?}: {}", issue.kind, issue.message);
                    }
                    println!("{} issue(s) found", issues.len());
                }
            }
        }
        Command::Targets { roster } => {
            let roster = load_roster(&roster)?;
            for target in report::available_targets(&roster) {
                println!("{target}");
            }
        }
        Command::Generate {
            roster,
            report: target,
            format,
            output,
            coverage,
        } => {
            let roster = load_roster(&roster)?;
            let target: ReportTarget = target.parse()?;
            let timetable = config.allocator().allocate(&roster);
            let view = report::project(&timetable, &roster, &target)?;
            let cov = coverage.then(|| CoverageReport::calculate(&roster, &timetable));

            let text = match format {
                Format::Text => {
                    let mut options = config.render_options();
                    if target == ReportTarget::Master {
                        options = options.with_generated_at(
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                        );
                    }
                    let mut text = report::render(&view, &options);
                    if let Some(cov) = &cov {
                        text.push('\n');
                        text.push_str(&cov.summary());
                    }
                    text
                }
                Format::Json => {
                    let value = serde_json::json!({
                        "report": view,
                        "coverage": cov,
                    });
                    let mut text = serde_json::to_string_pretty(&value)?;
                    text.push('\n');
                    text
                }
            };
            emit(&text, output.as_deref())?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
