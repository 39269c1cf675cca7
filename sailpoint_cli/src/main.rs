mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sailpoint_lib::{Configuration, RetryConfig, RetryingClient};

use crate::commands::list::{ListArgs, Resource};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "sail")]
#[command(about = "Page through SailPoint Identity Security Cloud collections and search")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List accounts
    Accounts(ListArgs),
    /// List access profiles
    AccessProfiles(ListArgs),
    /// List transforms
    Transforms(ListArgs),
    /// List governance groups (beta)
    Workgroups(ListArgs),
    /// Run a search query
    Search(commands::search::SearchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sail=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = cli.output;

    let config = Configuration::from_env().context("reading SAIL_* environment")?;
    let client = RetryingClient::new(config)?.with_retry_config(RetryConfig::from_env());

    match &cli.command {
        Commands::Accounts(args) => {
            commands::list::run(Resource::Accounts, args, &client, &format).await?
        }
        Commands::AccessProfiles(args) => {
            commands::list::run(Resource::AccessProfiles, args, &client, &format).await?
        }
        Commands::Transforms(args) => {
            commands::list::run(Resource::Transforms, args, &client, &format).await?
        }
        Commands::Workgroups(args) => {
            commands::list::run(Resource::Workgroups, args, &client, &format).await?
        }
        Commands::Search(args) => commands::search::run(args, &client, &format).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_table() {
        let cli = Cli::try_parse_from(["sail", "accounts"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Table);
    }

    #[test]
    fn output_accepts_known_formats() {
        let cli = Cli::try_parse_from(["sail", "transforms", "--output", "csv"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Csv);
        let cli = Cli::try_parse_from(["sail", "--output", "json", "workgroups"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn output_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["sail", "--output", "xml", "accounts"]).is_err());
        assert!(Cli::try_parse_from(["sail", "--output", "jsno", "accounts"]).is_err());
    }

    #[test]
    fn search_requires_indices() {
        assert!(Cli::try_parse_from(["sail", "search", "--query", "*"]).is_err());
        let cli = Cli::try_parse_from(["sail", "search", "--indices", "identities,roles"]).unwrap();
        match cli.command {
            Commands::Search(args) => assert_eq!(args.indices, vec!["identities", "roles"]),
            _ => panic!("expected search"),
        }
    }
}
