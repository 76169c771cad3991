//! Clap derive structures for the `stockroom` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stockroom -- equipment inventory store from the command line
#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    version,
    about = "Track equipment inventory and its per-model consolidated view",
    long_about = "Load equipment types, models, and raw inventory records from JSON,\n\
        consolidate them by model, hand-edit the result, and keep it all in a\n\
        persisted store between invocations.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "STOCKROOM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted store (overrides config)
    #[arg(long, env = "STOCKROOM_STORAGE_DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Storage namespace key (overrides config)
    #[arg(long, env = "STOCKROOM_KEY", global = true)]
    pub key: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "STOCKROOM_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load reference data from a JSON array file
    Load(LoadArgs),

    /// Recompute the consolidated view from raw equipment records
    #[command(alias = "c")]
    Consolidate,

    /// Show store contents
    #[command(alias = "ls")]
    Show(ShowArgs),

    /// Replace one row of the consolidated view
    Edit(EditArgs),

    /// Replace the consolidated view with rows from a JSON file
    Baseline(BaselineArgs),

    /// Override the consolidated view's modified flag
    Mark(MarkArgs),

    /// Select a type or model
    Select(SelectArgs),

    /// Set pagination values
    Page(PageArgs),

    /// Set or clear the error slot
    Error(ErrorArgs),

    /// Delete the persisted store and start from initial values
    Reset,

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Load ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Types,
    Models,
    Equipments,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Which reference list the file holds
    pub kind: ResourceKind,

    /// JSON file containing an array of records
    pub file: PathBuf,
}

// ── Show ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowTarget {
    #[default]
    Consolidated,
    Equipments,
    Types,
    Models,
    Selection,
    State,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// What to show
    #[arg(default_value = "consolidated")]
    pub target: ShowTarget,
}

// ── Consolidated view edits ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Zero-based row index in the consolidated view
    pub index: usize,

    /// New model string (defaults to the current one)
    #[arg(long)]
    pub model: Option<String>,

    /// New category (defaults to the current one)
    #[arg(long = "type")]
    pub category: Option<String>,

    /// New quantity (defaults to the current one)
    #[arg(long)]
    pub quantity: Option<u64>,
}

#[derive(Debug, Args)]
pub struct BaselineArgs {
    /// JSON file containing an array of consolidated rows
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkState {
    Clean,
    Dirty,
}

#[derive(Debug, Args)]
pub struct MarkArgs {
    pub state: MarkState,
}

// ── Selection ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(subcommand)]
    pub command: SelectCommand,
}

#[derive(Debug, Subcommand)]
pub enum SelectCommand {
    /// Select a loaded equipment type by id (clears the model)
    Type { id: i64 },

    /// Select a loaded equipment model by id
    Model { id: i64 },

    /// Clear both selections
    Reset,
}

// ── Pagination ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PageArgs {
    #[command(subcommand)]
    pub command: PageCommand,
}

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// Set the current page
    Current { page: u32 },

    /// Set the total page count
    Total { pages: u32 },

    /// Set the page size
    Size { items: u32 },
}

// ── Error slot ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ErrorArgs {
    #[command(subcommand)]
    pub command: ErrorCommand,
}

#[derive(Debug, Subcommand)]
pub enum ErrorCommand {
    /// Record an error message
    Set { message: String },

    /// Clear the error message
    Clear,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the resolved configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
