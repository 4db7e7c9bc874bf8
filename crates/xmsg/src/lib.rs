//! Parser and substitution engine for parameterized message templates.
//!
//! A template mixes literal text with tokens:
//!
//! - `{0}`, `{:name}` insert a parameter value
//! - `{0,number,integer}` formats a number
//! - `{0,choice,singular#member|plural#members}` selects a branch by plural
//!   or gender rule
//! - `{1,map,photo#photo|video#video}` selects a branch by exact value
//! - `{:link,link,text#messages}` wraps content in an `<a>` element
//!
//! Branch contents are templates themselves and may nest to any depth.
//!
//! ```
//! use xmsg::{args, parse, substitute};
//!
//! let template = parse(
//!     "{0} tagged himself/herself in {1,number} \
//!      {2,map,photo#{1,choice,singular#photo|plural#photos}|video#{1,choice,singular#video|plural#videos}}.",
//! )
//! .unwrap();
//!
//! let text = substitute(&template, "en", &args!["Michael", 5, "video"]).unwrap();
//! assert_eq!(text, "Michael tagged himself/herself in 5 videos.");
//! ```

pub mod interpreter;
pub mod parser;
mod renderer;
mod tokens;
pub mod types;

pub use interpreter::{
    CldrPlurals, Decoration, EvalContext, FormatError, MissingValuePolicy, PluralRuleResolver,
    SingularPlural, SubstitutionError, substitute, substitute_with,
};
pub use parser::{Index, Node, ParseError, Style, Template, parse_template as parse};
pub use renderer::Renderer;
pub use tokens::{ContextKey, Token, derive_tokens};
pub use types::{Params, Value};

/// Creates named [`Params`] from key-value pairs.
///
/// Values are converted via `Into<Value>`, so you can pass integers, floats,
/// strings, or attribute maps directly.
///
/// # Example
///
/// ```
/// use xmsg::{Params, params};
///
/// let p = params! { "numViews" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert!(matches!(p, Params::Named(_)));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        $crate::Params::Named(::std::collections::HashMap::new())
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            $crate::Params::Named(map)
        }
    };
}

/// Creates positional [`Params`] from a list of values.
///
/// # Example
///
/// ```
/// use xmsg::{Params, args};
///
/// let p = args!["Michael", 1, "photo"];
/// assert_eq!(p.len(), 3);
/// assert!(matches!(p, Params::Positional(_)));
/// ```
#[macro_export]
macro_rules! args {
    [] => {
        $crate::Params::Positional(::std::vec::Vec::new())
    };
    [ $($value:expr),+ $(,)? ] => {
        $crate::Params::Positional(::std::vec![
            $(::std::convert::Into::<$crate::Value>::into($value)),+
        ])
    };
}
