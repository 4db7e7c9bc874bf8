//! Template substitution engine.
//!
//! Walks a parsed template depth-first, left to right, appending to a single
//! output buffer. Style items of choice, map, and anchor tokens are evaluated
//! recursively with the same parameter source, so a nested token that reads
//! the same index sees the same value.

use tracing::{debug, trace, warn};

use crate::interpreter::decoration::Decoration;
use crate::interpreter::{EvalContext, MissingValuePolicy, SubstitutionError};
use crate::parser::ast::{Index, Node, Style, Template, find_style};
use crate::types::{Lookup, Params, Value};

/// Style key selected when the resolver's rule key has no matching branch.
const FALLBACK_STYLE: &str = "other";

/// Style key holding the content wrapped by an anchor token.
const ANCHOR_CONTENT_STYLE: &str = "text";

/// Substitute parameters into a template using the singular/plural resolver
/// and the raising missing-value policy.
///
/// # Example
///
/// ```
/// use xmsg::{Params, Value, parse, substitute};
///
/// let template = parse("{0} {0,choice,singular#member|plural#members}").unwrap();
/// let params = Params::Positional(vec![Value::from(2)]);
/// assert_eq!(substitute(&template, "en", &params).unwrap(), "2 members");
/// ```
pub fn substitute(
    template: &Template,
    language: &str,
    params: &Params,
) -> Result<String, SubstitutionError> {
    substitute_with(template, &EvalContext::new(language, params))
}

/// Substitute parameters into a template with an explicit context.
///
/// # Errors
///
/// Under [`MissingValuePolicy::Raise`], returns an error if:
/// - A param, number, map, or anchor token has no value
/// - A named token is read from positional parameters
/// - A choice token has no style at all to select
pub fn substitute_with(
    template: &Template,
    ctx: &EvalContext<'_>,
) -> Result<String, SubstitutionError> {
    let mut output = String::new();
    eval_nodes(&template.nodes, ctx, &mut output)?;
    Ok(output)
}

fn eval_nodes(
    nodes: &[Node],
    ctx: &EvalContext<'_>,
    output: &mut String,
) -> Result<(), SubstitutionError> {
    for node in nodes {
        match node {
            Node::Text { value } => output.push_str(value),
            Node::Param { index } => match required_value(index, ctx)? {
                Some(value) => output.push_str(&value.to_string()),
                None => output.push_str(&index.full_name()),
            },
            Node::Number { index, format } => match required_value(index, ctx)? {
                Some(value) => output.push_str(&format_number(value, format.as_deref())),
                None => output.push_str(&index.full_name()),
            },
            Node::Choice { index, styles } => eval_choice(index, styles, ctx, output)?,
            Node::Map { index, styles } => {
                if let Some(value) = required_value(index, ctx)? {
                    let key = value.to_string();
                    if let Some(style) = find_style(styles, &key) {
                        eval_nodes(&style.items, ctx, output)?;
                    }
                }
            }
            Node::Anchor {
                index,
                kind,
                styles,
            } => {
                let mut content = String::new();
                if let Some(style) = find_style(styles, ANCHOR_CONTENT_STYLE) {
                    eval_nodes(&style.items, ctx, &mut content)?;
                }
                trace!(token = %index.full_name(), keyword = kind.keyword(), "wrapping content");
                match required_value(index, ctx)? {
                    Some(value) => output.push_str(&Decoration::from_value(value).wrap(&content)),
                    None => output.push_str(&content),
                }
            }
        }
    }
    Ok(())
}

/// Look up a value that the token cannot render without.
///
/// Returns `Ok(None)` when the value is absent and the policy degrades.
fn required_value<'a>(
    index: &Index,
    ctx: &EvalContext<'a>,
) -> Result<Option<&'a Value>, SubstitutionError> {
    let error = match ctx.lookup(index) {
        Lookup::Found(value) => return Ok(Some(value)),
        Lookup::Missing => SubstitutionError::MissingValue {
            token: index.full_name(),
        },
        Lookup::WrongSourceKind => SubstitutionError::WrongSourceKind {
            token: index.full_name(),
        },
    };
    match ctx.policy() {
        MissingValuePolicy::Raise => Err(error),
        MissingValuePolicy::Degrade => {
            warn!(%error, "rendering degraded token");
            Ok(None)
        }
    }
}

/// Select and evaluate a choice branch.
///
/// The rule key comes from the resolver for numeric values and is the value
/// itself for other scalars. Selection falls back to the "other" style, then
/// to the first declared style. A missing value also takes the fallback.
fn eval_choice(
    index: &Index,
    styles: &[Style],
    ctx: &EvalContext<'_>,
    output: &mut String,
) -> Result<(), SubstitutionError> {
    let rule_key = match ctx.lookup(index) {
        Lookup::Found(value) => Some(rule_key_for(value, ctx)),
        Lookup::Missing => {
            debug!(token = %index.full_name(), "no value for choice, using fallback style");
            None
        }
        Lookup::WrongSourceKind => {
            required_value(index, ctx)?;
            None
        }
    };

    let selected = rule_key
        .as_deref()
        .and_then(|key| find_style(styles, key))
        .or_else(|| find_style(styles, FALLBACK_STYLE))
        .or_else(|| styles.first());

    let Some(style) = selected else {
        return Err(SubstitutionError::NoBranch {
            token: index.full_name(),
            rule_key: rule_key.unwrap_or_default(),
        });
    };
    trace!(
        token = %index.full_name(),
        rule_key = rule_key.as_deref().unwrap_or(""),
        selected = %style.key,
        "selected choice branch"
    );
    eval_nodes(&style.items, ctx, output)
}

fn rule_key_for(value: &Value, ctx: &EvalContext<'_>) -> String {
    match value {
        Value::Number(n) => ctx.rule_key(*n as f64),
        Value::Float(f) => ctx.rule_key(*f),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => ctx.rule_key(n),
            Err(_) => s.clone(),
        },
        Value::Bool(_) | Value::Map(_) => value.to_string(),
    }
}

/// Render a value with a named number format.
///
/// - `integer` drops the fractional part
/// - `percent` multiplies by 100, rounds, and appends `%`
///
/// Values that are not numeric, and unknown formats, use the plain display
/// form.
fn format_number(value: &Value, format: Option<&str>) -> String {
    let Some(n) = value.to_numeric() else {
        return value.to_string();
    };
    match format {
        None => value.to_string(),
        Some("integer") => (n.trunc() as i64).to_string(),
        Some("percent") => format!("{}%", (n * 100.0).round() as i64),
        Some(other) => {
            debug!(format = other, "unknown number format, rendering plain value");
            value.to_string()
        }
    }
}
