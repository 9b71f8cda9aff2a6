//! rcsb-go CLI - Main entry point

use clap::Parser;
use rcsb_go_cli::commands;
use rcsb_go_cli::{CacheCommand, Cli, Commands};
use rcsb_go_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(command) = &cli.command else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    // Verbose: debug to console. Otherwise warnings only, so stdout stays
    // clean for piping. LOG_* variables take precedence over both.
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("rcsb-go-cli")
        .build();
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging, so a failed init is not fatal
    let guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli, command).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        // process::exit skips destructors; flush file logs first
        drop(guard);
        process::exit(1);
    }
}

async fn execute_command(cli: &Cli, command: &Commands) -> rcsb_go_cli::Result<()> {
    match command {
        Commands::Fetch => commands::fetch::run(cli).await,

        Commands::Info { json } => commands::info::run(cli, *json).await,

        Commands::Term { id, json } => commands::term::run(cli, id, *json).await,

        Commands::Lineage {
            ids,
            exclude_self,
            json,
        } => commands::lineage::run(cli, ids, *exclude_self, *json).await,

        Commands::Children { id } => commands::neighbors::children(cli, id).await,

        Commands::Parents { id } => commands::neighbors::parents(cli, id).await,

        Commands::Roots => commands::roots::run(cli).await,

        Commands::Export {
            filter_file,
            output,
        } => commands::export::run(cli, filter_file.as_deref(), output.as_ref()).await,

        Commands::Cache { command } => match command {
            CacheCommand::List => commands::cache::list(cli),
            CacheCommand::Clear => commands::cache::clear(cli),
        },
    }
}
