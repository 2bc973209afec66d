//! CLI command definitions and dispatch.

pub mod config;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use tubely_core::config::AppConfig;
use tubely_core::error::AppError;

use crate::output::OutputFormat;

/// Tubely: video thumbnail service
#[derive(Debug, Parser)]
#[command(name = "tubely", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file; overrides `--env`
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay merged over `config/default.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Tubely server
    Serve(serve::ServeArgs),
    /// Issue an access token for a user
    Token(token::TokenArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Token(args) => token::execute(args, &config, self.format),
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => AppConfig::load(&self.env),
        }
    }
}
