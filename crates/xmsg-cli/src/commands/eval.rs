//! Implementation of the `xmsg eval` command.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use xmsg::{
    CldrPlurals, FormatError, MissingValuePolicy, Params, PluralRuleResolver, Renderer,
    SingularPlural, Value,
};

use crate::output::TemplateDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Language code for plural rules (e.g., en, de, ru)
    #[arg(long, env = "XMSG_LANG", default_value = "en")]
    pub lang: String,

    /// Template string to evaluate
    #[arg(long, required = true)]
    pub template: String,

    /// Parameters in name=value format (repeatable); `0=x` feeds `{0}`
    #[arg(short = 'p', long = "param", value_parser = parse_key_val, conflicts_with = "args_json")]
    pub params: Vec<(String, String)>,

    /// Parameters as a JSON array (positional) or object (named)
    #[arg(long)]
    pub args_json: Option<String>,

    /// Use CLDR plural categories (one, few, many, other) for choice tokens
    #[arg(long)]
    pub cldr: bool,

    /// Render missing values as raw tokens instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Convert a command-line value, preferring integers, then floats.
fn parse_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::from(f)
    } else {
        Value::from(raw)
    }
}

/// Build the parameter source from either `--args-json` or `-p` pairs.
///
/// `-p` pairs always form a named source; decimal names such as `0` are read
/// by positional tokens.
fn build_params(args: &EvalArgs) -> miette::Result<Params> {
    if let Some(json) = &args.args_json {
        return serde_json::from_str(json)
            .map_err(|e| miette::miette!("Invalid --args-json value: {}", e));
    }
    let named: HashMap<String, Value> = args
        .params
        .iter()
        .cloned()
        .map(|(k, v)| (k, parse_value(v)))
        .collect();
    Ok(Params::Named(named))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let params = build_params(&args)?;

    let resolver: Arc<dyn PluralRuleResolver + Send + Sync> = if args.cldr {
        Arc::new(CldrPlurals)
    } else {
        Arc::new(SingularPlural)
    };
    let policy = if args.lenient {
        MissingValuePolicy::Degrade
    } else {
        MissingValuePolicy::Raise
    };
    let renderer = Renderer::builder()
        .language(args.lang.clone())
        .resolver(resolver)
        .policy(policy)
        .build();

    match renderer.format(&args.template, &params) {
        Ok(result) => {
            if args.json {
                let output = EvalResult { result };
                let json = serde_json::to_string_pretty(&output)
                    .map_err(|e| miette::miette!("Failed to serialize result: {}", e))?;
                println!("{}", json);
            } else {
                println!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(FormatError::Parse(e)) => {
            let diagnostic = TemplateDiagnostic::from_parse_error("<template>", &args.template, &e);
            Err(diagnostic.into())
        }
        Err(FormatError::Substitution(e)) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", output);
            } else {
                eprintln!("Substitution error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
