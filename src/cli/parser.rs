use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rattendance
/// CLI application to take classroom attendance with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple attendance CLI: walk your roster, mark present/absent, review the last 30 days",
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
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log in as a teacher for a subject (creates the teacher on first use)
    Login {
        #[arg(long, help = "Teacher name")]
        name: String,

        #[arg(long, help = "Subject to take attendance for")]
        subject: String,
    },

    /// Forget the active teacher
    Logout,

    /// Show the active teacher and subject
    Whoami,

    /// Switch the active subject
    Subject {
        /// Subject name
        name: String,

        #[arg(long, help = "Add the subject to your list if missing")]
        add: bool,
    },

    /// Manage the roster
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Take attendance: walk the roster one student at a time
    Take {
        #[arg(
            long,
            value_name = "MARKS",
            help = "Non-interactive marks, one letter per student: P=present, A=absent, R=retake, Q=quit (e.g. \"PAP\")"
        )]
        marks: Option<String>,
    },

    /// Review saved attendance sessions
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Dashboard: roster size, records, 7-day average, recent sessions
    Stats,
}

#[derive(Subcommand)]
pub enum StudentAction {
    /// Add a student to the roster
    Add {
        #[arg(long)]
        name: String,

        #[arg(long = "roll", help = "Roll number (unique per teacher)")]
        roll_number: String,

        #[arg(long)]
        class: String,

        #[arg(long)]
        section: String,

        #[arg(long, help = "Age (5-25)")]
        age: i64,

        #[arg(long, help = "Male, Female or Other")]
        gender: String,

        #[arg(long, help = "Photo URL or path (optional)")]
        photo: Option<String>,
    },

    /// List the roster in walk order
    List,

    /// Show one student
    Show { id: i64 },

    /// Update fields of a student
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "roll")]
        roll_number: Option<String>,

        #[arg(long)]
        class: Option<String>,

        #[arg(long)]
        section: Option<String>,

        #[arg(long)]
        age: Option<i64>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        photo: Option<String>,
    },

    /// Remove a student from the roster
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List sessions, newest first
    List {
        #[arg(long, help = "Only sessions saved on this day (YYYY-MM-DD, today, yesterday)")]
        date: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, help = "Sessions per page (default from config)")]
        limit: Option<u32>,

        #[arg(long = "all-subjects", help = "Include every subject, not only the active one")]
        all_subjects: bool,

        #[arg(long, help = "Print each student's mark")]
        details: bool,
    },

    /// Show one session with every mark
    Show { id: i64 },

    /// Export sessions to a file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Only sessions saved on this day")]
        date: Option<String>,

        #[arg(long = "all-subjects")]
        all_subjects: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Delete sessions older than the retention window
    Purge,
}
