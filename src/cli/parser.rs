use crate::export::ExportFormat;
use crate::models::RecordKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for hwcontrol
/// Hardware entries, exits and loans over a JSON record file
#[derive(Parser)]
#[command(
    name = "hwcontrol",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track hardware entries, exits and loans: overdue loans, stale entries, CSV export and a web form",
    long_about = None
)]
pub struct Cli {
    /// Override the record file path (useful for tests or a custom file)
    #[arg(global = true, long = "data", value_name = "FILE")]
    pub data: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the record file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Register a movement (entry, exit or loan)
    Add {
        #[arg(value_enum)]
        kind: RecordKind,

        #[arg(long, help = "Person signing the movement")]
        responsible: String,

        #[arg(long = "asset", help = "Asset tag (digits only, at least 7)")]
        asset_tag: String,

        #[arg(long, help = "Workflow / ticket id")]
        workflow: Option<String>,

        #[arg(long, help = "Movement date (DD/MM/YYYY HH:MM); defaults to now")]
        date: Option<String>,

        #[arg(long, help = "Reason: formatting, maintenance, repair, other")]
        reason: String,

        #[arg(long = "reason-detail", help = "Description, required with --reason other")]
        reason_detail: Option<String>,

        #[arg(long, help = "Hardware: desktop, notebook, keyboard/mouse, monitor, other")]
        hardware: String,

        #[arg(long = "hardware-detail", help = "Description, required with --hardware other")]
        hardware_detail: Option<String>,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long, help = "Borrower (loans only)")]
        borrower: Option<String>,

        #[arg(long = "due", help = "Loan due date (DD/MM/YYYY HH:MM)")]
        due_at: Option<String>,

        #[arg(long, help = "Initial note")]
        note: Option<String>,
    },

    /// List records with their derived status
    List {
        #[arg(long = "all", help = "Include deleted records")]
        all: bool,

        #[arg(long, value_enum, help = "Only records of this kind")]
        kind: Option<RecordKind>,

        #[arg(long, conflicts_with = "pending", help = "Only overdue loans")]
        overdue: bool,

        #[arg(long, help = "Only stale entries (no exit and no recent note)")]
        pending: bool,
    },

    /// Show every field of one record
    Show { id: u64 },

    /// Mark a loan or an entry as returned
    Return { id: u64 },

    /// Delete (hide) a record
    Hide { id: u64 },

    /// Set a new due date on an open loan
    Extend {
        id: u64,

        #[arg(help = "New due date (DD/MM/YYYY HH:MM)")]
        due: String,
    },

    /// Append a note to a record
    Note { id: u64, text: String },

    /// Toggle the in-stock flag of an open entry
    Stock { id: u64 },

    /// Export records to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (absolute path)")]
        file: String,

        #[arg(long, value_enum)]
        kind: Option<RecordKind>,

        #[arg(
            long,
            help = "Status tag: deleted, returned, overdue, in_stock, active, none"
        )]
        status: Option<String>,

        /// Date range on the movement date.
        ///
        /// Supported formats: YYYY, YYYY-MM, YYYY-MM-DD and ranges in the
        /// same format (YYYY:YYYY, YYYY-MM:YYYY-MM, YYYY-MM-DD:YYYY-MM-DD).
        /// `all` disables date filtering.
        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long)]
        responsible: Option<String>,

        #[arg(long)]
        workflow: Option<String>,

        #[arg(long = "include-hidden")]
        include_hidden: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the record file
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup (zip on Windows, tar.gz elsewhere)")]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Start the web front-end
    Serve {
        #[arg(long, help = "Bind address (overrides config and HWCONTROL_HOST)")]
        host: Option<String>,

        #[arg(long, help = "Port (overrides config and HWCONTROL_PORT)")]
        port: Option<u16>,
    },
}
