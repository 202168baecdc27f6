//! `railguard`: compliance pipeline CLI.
//!
//! Exit code 0 on success/approval, 1 on failure or a blocked gate.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use railguard_core::config::{CliOverrides, RailguardConfig};
use railguard_core::types::{CheckStatus, ComplianceLevel};
use railguard_rails::SafetyRailsSystem;

#[derive(Parser)]
#[command(name = "railguard", version, about = "Compliance enforcement pipeline")]
struct Cli {
    /// Project root the pipeline operates on.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Compliance level override: strict, moderate, or permissive.
    #[arg(long, global = true, value_parser = parse_level)]
    level: Option<ComplianceLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pre-commit check battery and report the gate decision.
    Precommit,
    /// Print a JSON status snapshot of the system.
    Status,
    /// Restore the most recent backup.
    Emergency,
    /// Create a backup (named, or timestamped when no name is given).
    Backup {
        /// Backup name.
        name: Option<String>,
    },
}

fn parse_level(s: &str) -> Result<ComplianceLevel, String> {
    match s.to_lowercase().as_str() {
        "strict" => Ok(ComplianceLevel::Strict),
        "moderate" => Ok(ComplianceLevel::Moderate),
        "permissive" => Ok(ComplianceLevel::Permissive),
        other => Err(format!(
            "unknown level {other:?} (expected strict, moderate, or permissive)"
        )),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let overrides = CliOverrides {
        compliance_level: cli.level,
        ..Default::default()
    };
    let config = RailguardConfig::load(&cli.root, Some(&overrides))?;
    let mut system = SafetyRailsSystem::new(&cli.root, config)?;

    match cli.command {
        Command::Precommit => {
            let report = system.run_precommit_checks();
            for result in &report.results {
                let marker = match result.status {
                    CheckStatus::Pass => "PASS",
                    CheckStatus::Warning => "WARN",
                    CheckStatus::Fail => "FAIL",
                    CheckStatus::Blocked => "BLCK",
                };
                println!(
                    "[{marker}] {:<20} {} ({}ms)",
                    result.check_name, result.message, result.execution_time_ms
                );
            }
            for warning in &report.warnings {
                println!("warning: {warning}");
            }
            if report.approved {
                println!("gate: APPROVED");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("gate: BLOCKED");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Status => {
            let status = system.status()?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Emergency => {
            if system.emergency_rollback()? {
                println!("emergency rollback complete");
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("no backups available to restore");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Backup { name } => {
            let path = system.create_backup(name.as_deref())?;
            println!("backup created at {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
