//! Info command handler
//!
//! Resolves an algorithm slug and shows the values a run would use.

use anyhow::Result;
use clap::Args;
use colored::*;
use std::sync::Arc;

use crate::config::RunnerConfig;
use crate::context::JobContext;
use crate::error::RunError;
use crate::repository::AlgorithmRepository;

/// Arguments of `gcalgo info`
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Algorithm slug, as shown in the algorithm URL
    #[arg(short, long)]
    pub algorithm: String,
}

/// Handle `gcalgo info`
pub async fn handle_info_command(
    args: InfoArgs,
    repository: Arc<dyn AlgorithmRepository>,
) -> Result<()> {
    let algorithm = repository
        .find_algorithm(&args.algorithm)
        .await?
        .ok_or_else(|| RunError::InvalidAlgorithm(args.algorithm.clone()))?;

    let context = JobContext::from_algorithm(&algorithm, RunnerConfig::default().default_headstart);

    println!("{}", "Algorithm Details:".bold());
    println!("  Slug:       {}", algorithm.slug.cyan());
    if !algorithm.title.is_empty() {
        println!("  Title:      {}", algorithm.title);
    }
    println!("  ID:         {}", algorithm.pk.to_string().dimmed());
    match algorithm.average_duration {
        Some(average) => println!("  Average:    {:.0}s", average),
        None => println!("  Average:    {}", "unknown".dimmed()),
    }
    println!("  Headstart:  {}s", context.headstart.as_secs());

    Ok(())
}
