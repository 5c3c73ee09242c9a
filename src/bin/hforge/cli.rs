use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use haworth_forge::{Anomer, RingType};

#[derive(Parser)]
#[command(
    name = "hforge",
    about = "Haworth projections from sugar codes",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render Haworth diagrams to JSON op lists
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Resolve substituent maps without drawing
    #[command(visible_alias = "s")]
    Spec(SpecArgs),

    /// Render and gate every request, reporting failures
    #[command(visible_alias = "c")]
    Check(CheckArgs),
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Render(args) => args.output.quiet,
            Command::Spec(args) => args.output.quiet,
            Command::Check(args) => args.quiet,
        }
    }
}

/// Sugar codes to process, shared by all commands.
#[derive(Args)]
pub struct InputOptions {
    /// Sugar code, e.g. ARLRDM (omit to read --batch or stdin)
    #[arg(value_name = "CODE")]
    pub code: Option<String>,

    /// Batch file with one `CODE [RING] [ANOMER]` per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "code")]
    pub batch: Option<PathBuf>,

    /// Ring size for requests that do not name one
    #[arg(long, value_name = "RING", default_value = "pyranose")]
    pub ring: RingArg,

    /// Anomeric configuration for requests that do not name one
    #[arg(long, value_name = "ANOMER", default_value = "alpha")]
    pub anomer: AnomerArg,
}

/// Output options shared by the render and spec commands.
#[derive(Args)]
pub struct OutputOptions {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print a single JSON document
    #[arg(long)]
    pub pretty: bool,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Drawing options shared by the render and check commands.
#[derive(Args)]
#[command(next_help_heading = "Drawing")]
pub struct StyleOptions {
    /// Style overrides (TOML file)
    #[arg(long, value_name = "FILE")]
    pub style: Option<PathBuf>,

    /// Ring bond length in drawing units
    #[arg(long, value_name = "LEN", default_value = "60.0")]
    pub bond_length: f64,

    /// Label font size in drawing units
    #[arg(long, value_name = "SIZE", default_value = "12.0")]
    pub font_size: f64,

    /// Gate tolerance, overriding the style file
    #[arg(long, value_name = "EPS")]
    pub epsilon: Option<f64>,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub style: StyleOptions,

    /// Emit only the op list instead of the spec and ops
    #[arg(long)]
    pub ops_only: bool,
}

#[derive(Args)]
pub struct SpecArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub style: StyleOptions,

    /// Suppress progress and tables; report through the exit code only
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum RingArg {
    /// Six-membered ring
    #[default]
    #[value(alias = "p")]
    Pyranose,
    /// Five-membered ring
    #[value(alias = "f")]
    Furanose,
}

impl From<RingArg> for RingType {
    fn from(arg: RingArg) -> Self {
        match arg {
            RingArg::Pyranose => RingType::Pyranose,
            RingArg::Furanose => RingType::Furanose,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum AnomerArg {
    #[default]
    #[value(alias = "a")]
    Alpha,
    #[value(alias = "b")]
    Beta,
}

impl From<AnomerArg> for Anomer {
    fn from(arg: AnomerArg) -> Self {
        match arg {
            AnomerArg::Alpha => Anomer::Alpha,
            AnomerArg::Beta => Anomer::Beta,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
