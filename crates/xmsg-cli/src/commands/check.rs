//! Implementation of the `xmsg check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{miette, IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::debug;

use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check, one template per line (blank lines are skipped)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a template that failed to parse.
#[derive(Debug, Serialize)]
struct CheckFailure {
    file: String,
    line: usize,
    column: usize,
    message: String,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut checked = 0;
    let mut failures = Vec::new();

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read {:?}: {}", path, e))?;
        debug!(file = %path.display(), "checking templates");

        for (line_number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            checked += 1;
            if let Err(e) = xmsg::parse(line) {
                let name = format!("{}:{}", path.display(), line_number + 1);
                if !args.json {
                    let diagnostic = TemplateDiagnostic::from_parse_error(&name, line, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                let (_, column) = e.position();
                failures.push(CheckFailure {
                    file: path.display().to_string(),
                    line: line_number + 1,
                    column,
                    message: e.to_string(),
                });
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&failures).into_diagnostic()?);
    } else if failures.is_empty() {
        println!(
            "{} {} template(s) checked",
            "ok".if_supports_color(Stream::Stdout, |t| t.green()),
            checked
        );
    } else {
        println!(
            "{} {} of {} template(s) failed to parse",
            "error".if_supports_color(Stream::Stdout, |t| t.red()),
            failures.len(),
            checked
        );
    }

    if failures.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
