//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "bundlegen",
    bin_name = "bundlegen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Bundle scaffolding for existing applications",
    long_about = "Bundlegen generates a bundle skeleton inside an existing \
                  application tree and registers it in the kernel bootstrap, \
                  the autoload configuration, the ORM mappings, and routing.",
    after_help = "EXAMPLES:\n\
        \x20 bundlegen init \"Acme\\\\BlogBundle\"\n\
        \x20 bundlegen init Acme/BlogBundle AcmeBlogBundle --app-dir ./shop\n\
        \x20 bundlegen init \"Acme\\\\BlogBundle\" --dry-run --plan-format json\n\
        \x20 bundlegen completions bash > /usr/share/bash-completion/completions/bundlegen",
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
    /// Scaffold a new bundle into an application tree.
    #[command(
        visible_alias = "i",
        about = "Scaffold a new bundle",
        after_help = "EXAMPLES:\n\
            \x20 bundlegen init \"Acme\\\\BlogBundle\"\n\
            \x20 bundlegen init Acme/BlogBundle --app-dir ./shop\n\
            \x20 bundlegen init \"Acme\\\\BlogBundle\" CustomBlogBundle --dry-run"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 bundlegen completions bash > ~/.local/share/bash-completion/completions/bundlegen\n\
            \x20 bundlegen completions zsh  > ~/.zfunc/_bundlegen\n\
            \x20 bundlegen completions fish > ~/.config/fish/completions/bundlegen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `bundlegen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Bundle namespace. Must end with `Bundle` and contain a vendor
    /// segment; forward slashes are accepted in place of backslashes.
    #[arg(value_name = "NAMESPACE", help = "Namespace of the bundle to create")]
    pub namespace: String,

    /// Explicit bundle name. Derived from the namespace when omitted
    /// (`Acme\BlogBundle` -> `AcmeBlogBundle`).
    #[arg(value_name = "BUNDLE_NAME", help = "Optional bundle name")]
    pub bundle_name: Option<String>,

    /// Application root the scaffold operates in.
    #[arg(
        long = "app-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Application root directory"
    )]
    pub app_dir: PathBuf,

    /// Skeleton directory to use instead of the built-in skeleton.
    #[arg(long = "skeleton", value_name = "DIR", help = "Custom skeleton directory")]
    pub skeleton: Option<PathBuf>,

    /// Preview the planned operations without writing any files.
    #[arg(long = "dry-run", help = "Show planned operations without applying them")]
    pub dry_run: bool,

    /// Output format for `--dry-run`.
    #[arg(
        long = "plan-format",
        value_enum,
        default_value = "human",
        help = "Plan output format"
    )]
    pub plan_format: PlanFormat,
}

/// Output format for the planned operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    /// One operation per line.
    Human,
    /// JSON array of steps.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `bundlegen completions`.
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

// ── tests ─────────────────────────────────────────────────────────────────────
