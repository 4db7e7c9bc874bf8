//! CLI command implementations.

mod check;
mod eval;
mod parse;
mod tokens;

pub use check::{run_check, CheckArgs};
pub use eval::{run_eval, EvalArgs};
pub use parse::{run_parse, ParseArgs};
pub use tokens::{run_tokens, TokensArgs};
