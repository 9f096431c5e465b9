use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asana-tool")]
#[command(
    author,
    version,
    about = "Browse, triage and annotate Asana tasks from a cached local view"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file, rotated daily
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a project and all of its tasks
    Show {
        /// Asana project ID
        project: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the views available to you
    Views {
        /// Include views tailored to other users
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project's tasks through a view
    #[command(visible_alias = "ls")]
    View {
        /// Asana project ID
        project: String,

        /// View key (see `asana-tool views`)
        view: String,

        /// Open every listed task in the browser (up to 10)
        #[arg(long)]
        open: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a note below a task's separator line
    Note {
        /// Asana project ID containing the task
        project: String,

        /// Asana task ID
        task: String,

        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Put a task on hold for yourself until a date
    Hold {
        /// Asana project ID containing the task
        project: String,

        /// Asana task ID
        task: String,

        /// Hold until this date: MM/DD, MM/DD/YY or MM/DD/YYYY
        until: String,
    },

    /// Tag a task with a color
    Color {
        /// Asana project ID containing the task
        project: String,

        /// Asana task ID
        task: String,

        /// Color to add
        #[arg(value_enum)]
        color: ColorArg,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Serve the GraphQL API and GraphiQL on localhost
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 4000)]
        port: u16,

        /// Open GraphiQL in the browser once started
        #[arg(long)]
        open: bool,
    },

    /// Execute a GraphQL query or mutation
    Query {
        /// GraphQL document
        query: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (token masked)
    Show,

    /// Print the config file path
    Path,

    /// Set a value: token, workspace, initials, base_url or stale_after_secs
    Set {
        key: String,
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorArg {
    Purple,
    DarkPurple,
    Yellow,
    Orange,
    Blue,
    LightBlue,
    LightTeal,
    Coral,
    HotPink,
    LightPink,
}

impl From<ColorArg> for crate::model::Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Purple => crate::model::Color::Purple,
            ColorArg::DarkPurple => crate::model::Color::DarkPurple,
            ColorArg::Yellow => crate::model::Color::Yellow,
            ColorArg::Orange => crate::model::Color::Orange,
            ColorArg::Blue => crate::model::Color::Blue,
            ColorArg::LightBlue => crate::model::Color::LightBlue,
            ColorArg::LightTeal => crate::model::Color::LightTeal,
            ColorArg::Coral => crate::model::Color::Coral,
            ColorArg::HotPink => crate::model::Color::HotPink,
            ColorArg::LightPink => crate::model::Color::LightPink,
        }
    }
}
