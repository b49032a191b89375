use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rGuestDesk
/// Party check-in desk: classify guests, keep the running list, mirror it
/// to a shared sheet
#[derive(Parser)]
#[command(
    name = "rguestdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A party check-in desk: register guests, count payers and share the sheet with other desks",
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

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
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

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a new event and announce it on the sheet
    Start {
        /// Event name
        event: String,

        #[arg(long, help = "Contracted number of guests (default from config)")]
        capacity: Option<i64>,
    },

    /// Join an event another desk already started today
    Join {
        /// Event name as shown by `events`
        event: String,
    },

    /// List the events with rows on the sheet today
    Events,

    /// End the current event on this desk
    End {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Register a guest
    Add {
        /// Guest name
        #[arg(required_unless_present = "quick", conflicts_with = "quick")]
        name: Option<String>,

        #[arg(long, value_name = "AGE", conflicts_with = "courtesy", help = "Register as a child of the given age")]
        child: Option<u32>,

        #[arg(long, help = "Register as courtesy (staff, family)")]
        courtesy: bool,

        #[arg(
            long,
            short = 'q',
            value_name = "TEXT",
            conflicts_with_all = ["child", "courtesy"],
            help = "Quick entry, e.g. \"Leo 5\" or \"Staff Bruno\""
        )]
        quick: Option<String>,
    },

    /// Remove the last registered guest (only shortly after adding it)
    Undo,

    /// Delete a guest by id (admin)
    Del {
        #[arg(long, help = "Guest id as shown by `list`")]
        id: String,

        #[arg(long, help = "Admin password")]
        password: String,
    },

    /// Show the guest list, newest first
    List,

    /// Show counters, capacity and undo availability
    Status,

    /// Arrivals per hour (admin)
    Stats {
        #[arg(long, help = "Admin password")]
        password: String,
    },

    /// Reload the guest list from the sheet
    Sync,

    /// Write the PDF report of the current event
    Report {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the guest list
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the link that shares the current summary
    Share,

    /// Interactive check-in loop
    Desk,
}
