//! Command-line interface definitions using clap.
//!
//! Argument structs stay in this module; [`crate::cli::Cli`] turns them into
//! calls on `research_core`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use research_core::ExportFormat;

/// Headless client for deep research runs
///
/// Parses planner output into a reviewable checklist, replays recorded
/// workflow event streams and runs the fixture sessions against a scripted
/// transport.
#[derive(Parser)]
#[command(version, about, name = "dr")]
pub struct Args {
    /// Directory export files are written to. Defaults to
    /// $XDG_DATA_HOME/research/exports
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,

    /// Workflow deployment name. Overrides RESEARCH_DEPLOYMENT_NAME
    #[arg(long, global = true)]
    pub deployment: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and confirm planner output
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Fold a recorded JSON-lines event stream
    Replay(ReplayArgs),
    /// Run a fixture session through the scripted transport
    Mock(MockArgs),
    /// Inspect the fixture sessions
    #[command(alias = "s")]
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Write a session's report or record to the export directory
    Export(ExportArgs),
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show planner text as a checklist
    Parse(PlanInput),
    /// Print the response that confirms a selection of steps
    Confirm(ConfirmArgs),
    /// Split planner output into its plan block and message
    Split(PlanInput),
}

#[derive(clap::Args)]
pub struct PlanInput {
    /// File holding the planner text, or '-' to read stdin
    pub file: String,
}

#[derive(clap::Args)]
pub struct ConfirmArgs {
    #[command(flatten)]
    pub input: PlanInput,

    /// Step number (1-based) to leave out; repeatable
    #[arg(long = "disable", value_name = "N")]
    pub disable: Vec<usize>,

    /// Ask for changes instead of confirming the selection
    #[arg(long, conflicts_with = "disable")]
    pub feedback: Option<String>,
}

#[derive(clap::Args)]
pub struct ReplayArgs {
    /// JSON-lines file with one `{ type, data }` envelope per line
    pub events: PathBuf,

    /// Seed the report with this session's baseline report
    #[arg(long, conflicts_with = "baseline")]
    pub session: Option<String>,

    /// Seed the report with the contents of this file
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// End the stream with a transport error carrying this message
    #[arg(long, value_name = "MESSAGE")]
    pub fail: Option<String>,

    /// Print every log entry
    #[arg(long)]
    pub log: bool,

    /// Print the final report
    #[arg(long)]
    pub report: bool,
}

#[derive(clap::Args)]
pub struct MockArgs {
    /// Research id of a fixture session
    pub session_id: String,

    /// Pause between streamed events, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// List all sessions
    #[command(alias = "ls")]
    List,
    /// Show one session
    Show {
        /// Research id
        id: String,
    },
}

#[derive(clap::Args)]
pub struct ExportArgs {
    /// Research id of the session to export
    pub session_id: String,

    /// Export format
    #[arg(long, value_enum, default_value_t = FormatArg::Md)]
    pub format: FormatArg,

    /// Run the scripted stream first and export its result
    #[arg(long)]
    pub run_mock: bool,
}

/// Command-line representation of [`ExportFormat`]
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Markdown report
    Md,
    /// Session record as JSON
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(val: FormatArg) -> Self {
        match val {
            FormatArg::Md => ExportFormat::Markdown,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}
