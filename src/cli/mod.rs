//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for coursegraph using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// coursegraph - content store to Neo4j export tool
#[derive(Parser, Debug)]
#[command(name = "coursegraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to ./coursegraph.toml when present)
    #[arg(short, long, env = "COURSEGRAPH_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COURSEGRAPH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dump every course to csv and print the Neo4j import command
    DumpToNeo4j(commands::dump::DumpArgs),

    /// Print the Neo4j import command for an existing csv directory
    ImportCommand(commands::import_command::ImportCommandArgs),

    /// Upload an existing csv directory to object storage
    Upload(commands::upload::UploadArgs),

    /// Dump the text of every html block to a single csv file
    DumpHtmlAsText(commands::html_text::HtmlTextArgs),

    /// Print course ids and enrollment end dates as JSON
    ListCourses(commands::courses::ListCoursesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_dump() {
        let cli = Cli::parse_from(["coursegraph", "dump-to-neo4j"]);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::DumpToNeo4j(args) => {
                assert!(args.csv_dir.is_none());
                assert!(!args.no_clear);
                assert!(!args.upload);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_dump_flags() {
        let cli = Cli::parse_from([
            "coursegraph",
            "dump-to-neo4j",
            "--csv-dir",
            "/data/csvs",
            "--neo4j-root",
            "/opt/neo4j",
            "--no-clear",
            "--upload",
        ]);
        match cli.command {
            Commands::DumpToNeo4j(args) => {
                assert_eq!(args.csv_dir.as_deref(), Some("/data/csvs"));
                assert_eq!(args.neo4j_root.as_deref(), Some("/opt/neo4j"));
                assert!(args.no_clear);
                assert!(args.upload);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["coursegraph", "--config", "custom.toml", "list-courses"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Commands::ListCourses(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["coursegraph", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_other_commands() {
        assert!(matches!(
            Cli::parse_from(["coursegraph", "import-command"]).command,
            Commands::ImportCommand(_)
        ));
        assert!(matches!(
            Cli::parse_from(["coursegraph", "upload", "--csv-dir", "/tmp/csvs"]).command,
            Commands::Upload(_)
        ));
        assert!(matches!(
            Cli::parse_from(["coursegraph", "dump-html-as-text", "-o", "/tmp/m.csv"]).command,
            Commands::DumpHtmlAsText(_)
        ));
        assert!(matches!(
            Cli::parse_from(["coursegraph", "init", "--force"]).command,
            Commands::Init(_)
        ));
    }
}
