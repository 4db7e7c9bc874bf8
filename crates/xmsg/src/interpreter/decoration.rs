//! Markup for anchor and link tokens.

use crate::types::Value;

/// Attribute names in the order they are rendered.
const ATTRIBUTES: [&str; 4] = ["href", "class", "style", "title"];

/// How an anchor token wraps its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// A scalar parameter: only the `href` attribute is rendered.
    Href(String),
    /// An attribute map: all four attributes are rendered, missing ones empty.
    Attributes {
        href: String,
        class: String,
        style: String,
        title: String,
    },
}

impl Decoration {
    /// Resolve the decoration for an anchor parameter.
    ///
    /// Map values use the attributes form. Attribute values that are not
    /// strings are rendered with their display form rather than rejected.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Map(map) => {
                let attribute = |name: &str| map.get(name).map(ToString::to_string).unwrap_or_default();
                Decoration::Attributes {
                    href: attribute("href"),
                    class: attribute("class"),
                    style: attribute("style"),
                    title: attribute("title"),
                }
            }
            scalar => Decoration::Href(scalar.to_string()),
        }
    }

    /// Wrap already-substituted content in an `<a>` element.
    ///
    /// Attribute values and content are emitted as-is, without escaping.
    pub fn wrap(&self, content: &str) -> String {
        match self {
            Decoration::Href(href) => format!("<a href='{href}'>{content}</a>"),
            Decoration::Attributes {
                href,
                class,
                style,
                title,
            } => {
                let mut markup = String::from("<a");
                for (name, value) in ATTRIBUTES.iter().zip([href, class, style, title]) {
                    markup.push_str(&format!(" {name}='{value}'"));
                }
                markup.push('>');
                markup.push_str(content);
                markup.push_str("</a>");
                markup
            }
        }
    }
}
