//! Implementation of the `xmsg tokens` command.

use miette::IntoDiagnostic;
use xmsg::derive_tokens;

use crate::output::table::format_token_table;
use crate::output::TemplateDiagnostic;

/// Arguments for the tokens command.
#[derive(Debug, clap::Args)]
pub struct TokensArgs {
    /// Template string to describe
    pub template: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the tokens command.
pub fn run_tokens(args: TokensArgs) -> miette::Result<i32> {
    let template = xmsg::parse(&args.template).map_err(|e| {
        TemplateDiagnostic::from_parse_error("<template>", &args.template, &e)
    })?;
    let tokens = derive_tokens(&template);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tokens).into_diagnostic()?);
    } else if tokens.is_empty() {
        println!("No tokens.");
    } else {
        println!("{}", format_token_table(&tokens));
    }
    Ok(exitcode::OK)
}
