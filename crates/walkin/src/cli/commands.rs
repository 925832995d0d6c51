//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Web server arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `server.bind`)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Live queue commands.
#[derive(Debug, Subcommand)]
pub enum QueueCommand {
    /// List customers waiting in the queue
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Assign a customer, removing them from the queue
    Assign {
        /// Queue id of the customer
        id: u64,
    },

    /// Remove every customer from the queue
    Clear {
        /// Confirm the operation
        #[arg(long)]
        yes: bool,
    },
}

/// Customer log commands.
#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List logged customers
    List {
        /// Only customers whose name or phone contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Export logged customers as CSV
    Export {
        /// Only customers whose name or phone contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Remove every customer from the log
    Clear {
        /// Confirm the operation
        #[arg(long)]
        yes: bool,
    },
}

/// Configuration management commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to config file to validate (defaults to standard location)
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct QueueCli {
        #[command(subcommand)]
        command: QueueCommand,
    }

    #[derive(Debug, Parser)]
    struct CustomersCli {
        #[command(subcommand)]
        command: CustomersCommand,
    }

    #[test]
    fn test_queue_assign_parses_id() {
        let cli = QueueCli::try_parse_from(["queue", "assign", "7"]).unwrap();
        assert!(matches!(cli.command, QueueCommand::Assign { id: 7 }));
    }

    #[test]
    fn test_queue_assign_rejects_non_numeric() {
        assert!(QueueCli::try_parse_from(["queue", "assign", "seven"]).is_err());
    }

    #[test]
    fn test_queue_clear_defaults_unconfirmed() {
        let cli = QueueCli::try_parse_from(["queue", "clear"]).unwrap();
        assert!(matches!(cli.command, QueueCommand::Clear { yes: false }));
    }

    #[test]
    fn test_customers_export_options() {
        let cli =
            CustomersCli::try_parse_from(["customers", "export", "-s", "al", "-o", "out.csv"])
                .unwrap();
        match cli.command {
            CustomersCommand::Export { search, output } => {
                assert_eq!(search.as_deref(), Some("al"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
