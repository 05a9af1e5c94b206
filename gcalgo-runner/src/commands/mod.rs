//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod info;
mod run;

use anyhow::Result;
use clap::Subcommand;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::repository::{AlgorithmRepository, HttpAlgorithmRepository};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload images, run the algorithm and download the mask
    Run(run::RunArgs),
    /// Show how an algorithm slug resolves, without uploading anything
    Info(info::InfoArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The API connection settings
pub async fn handle_command(command: Commands, config: &ApiConfig) -> Result<()> {
    config.validate()?;
    let repository: Arc<dyn AlgorithmRepository> =
        Arc::new(HttpAlgorithmRepository::new(config.build_client()?));

    match command {
        Commands::Run(args) => run::handle_run_command(args, repository).await,
        Commands::Info(args) => info::handle_info_command(args, repository).await,
    }
}
