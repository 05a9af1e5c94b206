//! Run command handler
//!
//! Uploads the input files, waits for the algorithm and saves the mask.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::RunnerConfig;
use crate::error::RunError;
use crate::repository::AlgorithmRepository;
use crate::service::{AlgorithmRunner, RunReport};

/// Arguments of `gcalgo run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Algorithm slug, as shown in the algorithm URL
    #[arg(short, long)]
    pub algorithm: String,

    /// Destination of the mask, must end in .mha
    #[arg(short, long)]
    pub output: PathBuf,

    /// Input image files, uploaded together as one case
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Polls per phase before giving up
    #[arg(long, env = "GC_POLL_ATTEMPTS", default_value_t = 25)]
    pub attempts: u32,

    /// Base wait between polls in seconds, grown 1.5x per attempt
    #[arg(long, env = "GC_POLL_INTERVAL", default_value_t = 15)]
    pub interval: u64,

    /// Seconds to wait after upload before the first import poll
    #[arg(long, env = "GC_IMPORT_HEADSTART", default_value_t = 30)]
    pub import_headstart: u64,

    /// Fail if the finished job produced no mask
    #[arg(long)]
    pub require_output: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            poll_attempts: self.attempts,
            poll_interval: Duration::from_secs(self.interval),
            import_headstart: Duration::from_secs(self.import_headstart),
            require_output: self.require_output,
            ..RunnerConfig::default()
        }
    }
}

/// Handle `gcalgo run`
pub async fn handle_run_command(
    args: RunArgs,
    repository: Arc<dyn AlgorithmRepository>,
) -> Result<()> {
    let config = args.runner_config();
    config.validate()?;

    let runner = AlgorithmRunner::connect(repository, &args.algorithm, config).await?;

    if !args.json {
        let context = runner.context();
        println!(
            "Running \"{}\" ({}) on {} file(s)",
            context.algorithm_slug.cyan(),
            context.algorithm_id.to_string().dimmed(),
            args.inputs.len()
        );
    }

    let report = match runner.run(&args.inputs, &args.output).await {
        Ok(report) => report,
        Err(e) => {
            if let RunError::ImportRejected {
                reason: Some(reason),
                ..
            } = &e
            {
                eprintln!("{} {}", "reason:".red(), reason);
            }
            if let Some(hint) = hint_for(&e) {
                eprintln!("{} {}", "hint:".yellow(), hint);
            }
            return Err(e)
                .with_context(|| format!("Running algorithm \"{}\" failed", args.algorithm));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Suggests a next step for the user, based on the kind of failure
fn hint_for(error: &RunError) -> Option<&'static str> {
    if error.is_timeout() {
        Some("the job may still finish remotely; retry with a larger --attempts or --interval")
    } else if error.is_rejection() {
        Some("grand-challenge refused the input; check the file format the algorithm expects")
    } else if error.is_configuration() {
        Some("check the algorithm slug and that --output ends in .mha")
    } else {
        match error {
            RunError::Client(e) if e.is_client_error() => {
                Some("check the API token and that it may use this algorithm")
            }
            RunError::Client(e) if e.is_server_error() => {
                Some("grand-challenge reported an internal error; try again later")
            }
            _ => None,
        }
    }
}

/// Print the outcome of a run
fn print_report(report: &RunReport) {
    println!(
        "{} Algorithm \"{}\" finished",
        "✓".green(),
        report.algorithm.bold()
    );
    println!("  Session:  {}", report.session_id.to_string().dimmed());
    println!("  Image:    {}", report.image_id.to_string().dimmed());
    println!("  Job:      {}", report.job_id.to_string().dimmed());

    if let Some(seconds) = report.job_duration_secs {
        println!("  Duration: {}s", seconds);
    }

    match &report.output {
        Some(path) => println!("  Output:   {}", path.display().to_string().cyan()),
        None => println!("  {}", "No mask output was produced".yellow()),
    }
}
