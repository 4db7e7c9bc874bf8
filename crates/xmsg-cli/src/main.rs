//! xmsg CLI entry point.
//!
//! Provides command-line tools for working with message templates:
//! - `xmsg parse` - Print the node tree of a template
//! - `xmsg eval` - Render a template with parameters
//! - `xmsg tokens` - Describe the tokens a translation must support
//! - `xmsg check` - Validate template syntax in files

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_eval, run_parse, run_tokens, CheckArgs, EvalArgs, ParseArgs, TokensArgs,
};
use tracing_subscriber::EnvFilter;

/// Message template tools.
#[derive(Debug, Parser)]
#[command(name = "xmsg")]
#[command(about = "Message template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the node tree of a template
    Parse(ParseArgs),
    /// Render a template with parameters
    Eval(EvalArgs),
    /// List the tokens of a template
    Tokens(TokensArgs),
    /// Check template syntax, one template per line
    Check(CheckArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Send library logs to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "xmsg=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Tokens(args) => run_tokens(args),
        Commands::Check(args) => run_check(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
