use crate::config::Backend;
use crate::export::{ExportFormat, ImportFormat};
use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for presencial
/// Track in-person and remote workdays against a monthly goal
#[derive(Parser)]
#[command(
    name = "presencial",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record in-person and remote workdays and follow the monthly in-person goal",
    long_about = None
)]
pub struct Cli {
    /// Override the data directory holding config.yaml
    #[arg(global = true, long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Override the ledger file for this run
    #[arg(global = true, long = "ledger", value_name = "PATH")]
    pub ledger: Option<String>,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration and the ledger
    Init {
        #[arg(long, value_enum, default_value = "sqlite", help = "Ledger backend")]
        backend: Backend,
    },

    /// View, check or change the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,

        #[arg(long = "goal", help = "Monthly in-person goal (1-24)")]
        goal: Option<u32>,

        #[arg(
            long = "areas",
            value_delimiter = ',',
            num_args = 1..,
            help = "Replace the list of work areas (comma separated)"
        )]
        areas: Option<Vec<String>>,

        #[arg(
            long = "headers",
            value_delimiter = ',',
            num_args = 1..,
            help = "Replace the five ledger column headers (comma separated)"
        )]
        headers: Option<Vec<String>>,

        #[arg(long = "extra-label", help = "Note used for days beyond the goal")]
        extra_label: Option<String>,

        #[arg(
            long = "markers",
            value_name = "YES,NO",
            help = "In-person and remote response markers"
        )]
        markers: Option<String>,
    },

    /// Record today's presence
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// Show the monthly report
    Report {
        #[arg(long, value_name = "YYYY-MM", help = "Month to report (default: current)")]
        month: Option<String>,
    },

    /// Show progress towards this month's goal
    Status,

    /// List every record in the ledger, newest first
    List,

    /// Export the ledger
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "YYYY-MM", help = "Export a single month")]
        month: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Import records from an exported document
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "json")]
        format: ImportFormat,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum AddKind {
    /// In-person day in one of the configured areas
    InPerson {
        #[arg(long, help = "Work area")]
        area: String,

        #[arg(long, default_value = "", help = "Optional note")]
        note: String,

        #[arg(long = "confirm-extra", help = "Confirm a day beyond the goal")]
        confirm_extra: bool,
    },

    /// Remote day
    Remote {
        #[arg(long, default_value = "", help = "Optional note")]
        note: String,
    },
}
