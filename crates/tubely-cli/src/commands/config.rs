//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use tubely_core::config::AppConfig;
use tubely_core::error::AppError;
use tubely_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate the configuration and print a summary
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match args.command.as_ref().unwrap_or(&ConfigCommand::Show) {
        ConfigCommand::Show => {
            let masked = masked(config);
            match format {
                OutputFormat::Json => output::print_json(&masked),
                OutputFormat::Table => println!("{masked:#?}"),
            }
        }
        ConfigCommand::Validate => {
            config.validate()?;
            output::print_success("Configuration is valid");
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Database", &format!("{:?}", config.database.provider));
            output::print_kv("Strategy", &format!("{:?}", config.storage.strategy));
            output::print_kv("Assets root", &config.storage.assets_root);
            output::print_kv("Max upload", &format!("{} bytes", config.storage.max_upload_bytes));
        }
    }

    Ok(())
}

/// Copy of `config` safe to print.
fn masked(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    config.auth.jwt_secret = "****".to_string();
    config.database.url = mask_password(&config.database.url);
    config
}
