use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Adarsh Kalikadien, Vivek Sinha",
    version,
    about = "molfix - read, check and repair the counts line and bond block of MDL MOL (V2000) files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set the number of threads used by `repair` for multiple files.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.format=csv
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode the bond block of a MOL file and print it.
    Bonds(BondsArgs),
    /// Re-render the atom and bond counts of a counts line.
    Counts(CountsArgs),
    /// Render one two-space-delimited bond record in fixed width.
    Line(LineArgs),
    /// Rewrite MOL files with corrected counts and fixed-width bond rows.
    Repair(RepairArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}

/// Arguments for the `bonds` subcommand.
#[derive(Args, Debug)]
pub struct BondsArgs {
    /// Path to the input MOL file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Number of atom rows ahead of the bond block.
    /// Read from the counts line when omitted.
    #[arg(short = 'n', long, value_name = "INT")]
    pub atoms: Option<usize>,

    /// Output format, overriding `output.format` from the config file.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `counts` subcommand.
#[derive(Args, Debug)]
pub struct CountsArgs {
    /// The existing counts line (quote it to keep its spacing).
    #[arg(required = true, allow_hyphen_values = true, value_name = "LINE")]
    pub line: String,

    /// New atom count.
    #[arg(short = 'n', long, value_name = "INT")]
    pub atoms: usize,

    /// New bond count.
    #[arg(short, long, value_name = "INT")]
    pub bonds: usize,
}

/// Arguments for the `line` subcommand.
#[derive(Args, Debug)]
pub struct LineArgs {
    /// Seven fields separated by exactly two spaces, e.g. "120  113  1  0  0  0  0".
    #[arg(required = true, allow_hyphen_values = true, value_name = "LINE")]
    pub line: String,
}

/// Arguments for the `repair` subcommand.
#[derive(Args, Debug)]
pub struct RepairArgs {
    /// MOL files to repair.
    #[arg(required = true, num_args = 1.., value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub destination: RepairDestination,

    /// Atom count to use for every input instead of the declared one.
    #[arg(short = 'n', long, value_name = "INT")]
    pub atoms: Option<usize>,

    /// Override `repair.strip-final-newline` from the config file.
    #[command(flatten)]
    pub final_newline: FinalNewline,
}

/// Where repaired files go; exactly one must be chosen.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct RepairDestination {
    /// Write repaired files into this directory, keeping their file names.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Overwrite the input files.
    #[arg(long)]
    pub in_place: bool,
}

/// A group to handle mutually exclusive flags for the final line terminator.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct FinalNewline {
    /// Remove the line terminator after the last line of each output file.
    #[arg(long)]
    pub strip_final_newline: bool,
    /// Keep the line terminator after the last line of each output file.
    #[arg(long)]
    pub keep_final_newline: bool,
}
