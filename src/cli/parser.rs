use crate::core::export::ExportFormat;
use crate::models::attendance::RawAttendance;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rAttendance
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record daily work locations and track rolling days in office using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Free-text attributes shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct EntryArgs {
    #[arg(long = "location", short = 'l', help = "Work location (e.g. Office, Home)")]
    pub location: Option<String>,

    #[arg(long = "city", help = "Work city")]
    pub city: Option<String>,

    #[arg(long = "day", help = "Day label (e.g. Mon)")]
    pub day: Option<String>,

    #[arg(long = "week", help = "Year-week number (e.g. 202501)")]
    pub week: Option<String>,

    #[arg(long = "notes", help = "Notes for the day")]
    pub notes: Option<String>,

    #[arg(long = "blockers", help = "Blockers")]
    pub blockers: Option<String>,

    #[arg(long = "in-flight", help = "Work in flight")]
    pub in_flight: Option<String>,
}

impl EntryArgs {
    /// Raw form of a new entry; options not given become empty strings.
    pub fn to_raw(&self, date: String) -> RawAttendance {
        let v = |o: &Option<String>| o.clone().unwrap_or_default();
        RawAttendance {
            date,
            work_location: v(&self.location),
            work_city: v(&self.city),
            day: v(&self.day),
            year_week: v(&self.week),
            notes: v(&self.notes),
            blockers: v(&self.blockers),
            in_flight: v(&self.in_flight),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a day (date defaults to today)
    Add {
        /// Date (YYYY-MM-DD, "January 6, 2025" or an RFC 3339 timestamp)
        date: Option<String>,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Replace fields of an existing record; omitted options keep their value
    Edit {
        id: i64,

        #[arg(long = "date", help = "New date")]
        date: Option<String>,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Delete a record by ID
    Del { id: i64 },

    /// List records
    List {
        #[arg(long, short, help = "Filter by year/month/day or a START:END range")]
        period: Option<String>,
    },

    /// Show a single record
    Show { id: i64 },

    /// Print the rolling in-office count for a date
    Rolling { date: String },

    /// Import records from a CSV file (first row is a header)
    Import {
        #[arg(value_name = "FILE")]
        file: String,

        #[arg(long, help = "Update records whose date already exists instead of skipping them")]
        overwrite: bool,
    },

    /// Export records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a START:END range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}
