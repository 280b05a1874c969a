//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No calculator logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use digicalc_core::domain::ResultFormat;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "digicalc",
    bin_name = "digicalc",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Keypad calculator with a strict input state machine",
    long_about = "digicalc evaluates arithmetic expressions and replays keypad \
                  sessions: digits, operators, dot, clear, erase and equals, \
                  with illegal key presses silently ignored.",
    after_help = "EXAMPLES:\n\
        \x20 digicalc eval '3+4*2'\n\
        \x20 digicalc eval '5!'\n\
        \x20 digicalc keys 1 2 + 3 . 5 =\n\
        \x20 digicalc pad\n\
        \x20 digicalc completions bash > /usr/share/bash-completion/completions/digicalc",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate an expression directly.
    #[command(
        visible_alias = "e",
        about = "Evaluate an expression",
        after_help = "EXAMPLES:\n\
            \x20 digicalc eval '3+4*2'\n\
            \x20 digicalc eval 2 ^ 10\n\
            \x20 digicalc eval --factorial on '3!^2'\n\
            \x20 digicalc eval --format compact '7/2'"
    )]
    Eval(EvalArgs),

    /// Replay a key script through a keypad session.
    #[command(
        visible_alias = "k",
        about = "Replay key presses",
        after_help = "EXAMPLES:\n\
            \x20 digicalc keys 3 + 4 x 2 =\n\
            \x20 digicalc keys --load '5!' =\n\
            \x20 digicalc keys --file session.keys\n\
            \x20 digicalc --output-format json keys 5 / 0 ="
    )]
    Keys(KeysArgs),

    /// Interactive terminal keypad.
    #[command(
        about = "Open the interactive keypad",
        after_help = "EXAMPLES:\n\
            \x20 digicalc pad\n\
            \x20 digicalc pad --keymap ~/.config/digicalc/keys.toml\n\
            \x20 digicalc -vv --log-file pad.log pad"
    )]
    Pad(PadArgs),

    /// Initialise a digicalc configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 digicalc init                  # default location\n\
            \x20 digicalc init --path ./digicalc.toml\n\
            \x20 digicalc init --force          # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 digicalc completions bash > ~/.local/share/bash-completion/completions/digicalc\n\
            \x20 digicalc completions zsh  > ~/.zfunc/_digicalc\n\
            \x20 digicalc completions fish > ~/.config/fish/completions/digicalc.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the digicalc configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 digicalc config get display.result_format\n\
            \x20 digicalc config list\n\
            \x20 digicalc config path"
    )]
    Config(ConfigCommands),
}

// ── eval ──────────────────────────────────────────────────────────────────────

/// Arguments for `digicalc eval`.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Expression to evaluate.  Several words are joined with spaces, so
    /// `digicalc eval 2 + 3` works without quoting.
    #[arg(
        value_name = "EXPR",
        required = true,
        num_args = 1..,
        allow_hyphen_values = true,
        help = "Expression to evaluate"
    )]
    pub expression: Vec<String>,

    /// Whether postfix `!` is available.
    #[arg(
        long = "factorial",
        value_enum,
        default_value = "auto",
        help = "Register the factorial operator"
    )]
    pub factorial: FactorialMode,

    /// Override `display.result_format` for this evaluation.
    #[arg(long = "format", value_enum, help = "Result format")]
    pub format: Option<ResultFormatArg>,
}

/// When to evaluate with the factorial-extended operator table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FactorialMode {
    /// Only when the expression contains `!`.
    #[default]
    Auto,
    /// Always.
    On,
    /// Never; `!` is an unknown operator.
    Off,
}

/// Result format as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultFormatArg {
    /// `11.0`
    Decimal,
    /// `11`
    Compact,
}

impl From<ResultFormatArg> for ResultFormat {
    fn from(arg: ResultFormatArg) -> Self {
        match arg {
            ResultFormatArg::Decimal => Self::Decimal,
            ResultFormatArg::Compact => Self::Compact,
        }
    }
}

// ── keys ──────────────────────────────────────────────────────────────────────

/// Arguments for `digicalc keys`.
#[derive(Debug, Args)]
pub struct KeysArgs {
    /// Key tokens: digits, `+ - x ÷ ^ %`, `sin cos tan`, `.`, `C`, `DEL`, `=`.
    #[arg(
        value_name = "KEY",
        allow_hyphen_values = true,
        conflicts_with = "file",
        help = "Key presses, in order"
    )]
    pub keys: Vec<String>,

    /// Read whitespace-separated key tokens from a file.
    #[arg(short = 'f', long = "file", value_name = "PATH", help = "Read keys from a file")]
    pub file: Option<PathBuf>,

    /// Load this text into the buffer before the first key.
    #[arg(
        long = "load",
        value_name = "TEXT",
        allow_hyphen_values = true,
        help = "Initial buffer text (e.g. '5!')"
    )]
    pub load: Option<String>,
}

// ── pad ───────────────────────────────────────────────────────────────────────

/// Arguments for `digicalc pad`.
#[derive(Debug, Args)]
pub struct PadArgs {
    /// Key-map file, overriding `keypad.keymap`.
    #[arg(long = "keymap", value_name = "FILE", help = "Key-map TOML file")]
    pub keymap: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `digicalc init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write somewhere other than the default config location.
    #[arg(long = "path", value_name = "FILE", help = "Where to write the config")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `digicalc completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `digicalc config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `display.error_marker`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
