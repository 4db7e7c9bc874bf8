//! Implementation of the `xmsg parse` command.

use miette::IntoDiagnostic;

use crate::output::TemplateDiagnostic;

/// Arguments for the parse command.
#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    /// Template string to parse
    pub template: String,

    /// Output the node tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the parse command.
pub fn run_parse(args: ParseArgs) -> miette::Result<i32> {
    let template = match xmsg::parse(&args.template) {
        Ok(template) => template,
        Err(e) => {
            let diagnostic = TemplateDiagnostic::from_parse_error("<template>", &args.template, &e);
            return Err(diagnostic.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&template).into_diagnostic()?);
    } else {
        println!("{:#?}", template.nodes);
    }
    Ok(exitcode::OK)
}
