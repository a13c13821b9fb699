// coursegraph - content store to Neo4j csv export
// Copyright (c) 2025 coursegraph Contributors
// Licensed under the MIT License

use coursegraph::cli::{Cli, Commands};
use coursegraph::config::{load_config_or_default, CourseGraphConfig};
use coursegraph::log_error_with_context;
use coursegraph::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The command reports configuration errors itself; logging falls back to
    // defaults so it can still be set up
    let config: CourseGraphConfig =
        load_config_or_default(cli.config.as_deref()).unwrap_or_default();
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);

    let _logging_guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "coursegraph - content store to Neo4j export"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    drop(_logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::DumpToNeo4j(args) => args.execute(config_path).await,
        Commands::ImportCommand(args) => args.execute(config_path).await,
        Commands::Upload(args) => args.execute(config_path).await,
        Commands::DumpHtmlAsText(args) => args.execute(config_path).await,
        Commands::ListCourses(args) => args.execute(config_path).await,
        Commands::ValidateConfig(args) => args.execute(config_path).await,
        Commands::Init(args) => args.execute().await,
    }
}
