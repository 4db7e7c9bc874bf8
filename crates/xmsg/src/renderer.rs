//! A reusable renderer bundling language, plural rules, and a template cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use bon::Builder;
use tracing::debug;

use crate::interpreter::{
    EvalContext, FormatError, MissingValuePolicy, PluralRuleResolver, SingularPlural,
    substitute_with,
};
use crate::parser::{ParseError, Template, parse_template};
use crate::tokens::{Token, derive_tokens};
use crate::types::Params;

/// Renders template strings with a fixed configuration.
///
/// Parsed templates are cached by their source string. The cache may be
/// shared across threads; populating it twice with the same template is
/// harmless, the last write wins.
///
/// # Example
///
/// ```
/// use xmsg::{Params, Renderer, Value};
///
/// let renderer = Renderer::builder().language("en").build();
/// let params = Params::Positional(vec![Value::from(5)]);
///
/// let text = renderer
///     .format("{0} {0,choice,singular#view|plural#views}", &params)
///     .unwrap();
/// assert_eq!(text, "5 views");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Renderer {
    /// Language passed to the plural rule resolver.
    #[builder(default = "en".to_string())]
    language: String,

    /// What to do when a token has no value.
    #[builder(default)]
    policy: MissingValuePolicy,

    /// Resolver for choice tokens.
    #[builder(default = default_resolver())]
    resolver: Arc<dyn PluralRuleResolver + Send + Sync>,

    /// Parsed templates keyed by source string.
    #[builder(skip)]
    cache: RwLock<HashMap<String, Arc<Template>>>,
}

fn default_resolver() -> Arc<dyn PluralRuleResolver + Send + Sync> {
    Arc::new(SingularPlural)
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::builder().build()
    }
}

impl Renderer {
    /// Create a renderer for a language with default settings.
    pub fn with_language(language: impl Into<String>) -> Self {
        Renderer::builder().language(language.into()).build()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn policy(&self) -> MissingValuePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: MissingValuePolicy) {
        self.policy = policy;
    }

    /// Parse a template, reusing a cached tree when one exists.
    pub fn parse(&self, source: &str) -> Result<Arc<Template>, ParseError> {
        if let Some(template) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            return Ok(Arc::clone(template));
        }

        debug!(template = source, "template cache miss");
        let template = Arc::new(parse_template(source)?);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source.to_string(), Arc::clone(&template));
        Ok(template)
    }

    /// Parse and render a template in the renderer's language.
    pub fn format(&self, source: &str, params: &Params) -> Result<String, FormatError> {
        self.format_in(&self.language, source, params)
    }

    /// Parse and render a template in an explicit language.
    pub fn format_in(
        &self,
        language: &str,
        source: &str,
        params: &Params,
    ) -> Result<String, FormatError> {
        let template = self.parse(source)?;
        let ctx = EvalContext::new(language, params)
            .with_resolver(self.resolver.as_ref())
            .with_policy(self.policy);
        Ok(substitute_with(&template, &ctx)?)
    }

    /// Describe the tokens of a template.
    pub fn tokens(&self, source: &str) -> Result<Vec<Token>, ParseError> {
        let template = self.parse(source)?;
        Ok(derive_tokens(&template))
    }

    /// Number of cached templates.
    pub fn cached_templates(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop all cached templates.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
