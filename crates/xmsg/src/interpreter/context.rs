//! Evaluation context carried through recursive substitution.

use crate::interpreter::plural::{PluralRuleResolver, SingularPlural};
use crate::parser::Index;
use crate::types::{Lookup, Params};

/// What substitution does when a token has no value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingValuePolicy {
    /// Fail with a `SubstitutionError`. Suited to validation tooling.
    #[default]
    Raise,
    /// Render the raw token (`{0}`) or nothing, and log a warning. Suited to
    /// user-facing rendering.
    Degrade,
}

/// Evaluation context for one substitution.
///
/// The context tracks:
/// - The language passed to the plural rule resolver
/// - The parameter source every token reads from, including tokens nested
///   inside choice, map, and anchor styles
/// - The plural rule resolver for choice tokens
/// - The missing-value policy
pub struct EvalContext<'a> {
    language: &'a str,
    params: &'a Params,
    resolver: &'a dyn PluralRuleResolver,
    policy: MissingValuePolicy,
}

impl<'a> EvalContext<'a> {
    /// Create a context using the singular/plural resolver and the raising
    /// policy.
    pub fn new(language: &'a str, params: &'a Params) -> Self {
        Self {
            language,
            params,
            resolver: &SingularPlural,
            policy: MissingValuePolicy::Raise,
        }
    }

    /// Replace the plural rule resolver.
    pub fn with_resolver(mut self, resolver: &'a dyn PluralRuleResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the missing-value policy.
    pub fn with_policy(mut self, policy: MissingValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn language(&self) -> &str {
        self.language
    }

    pub fn policy(&self) -> MissingValuePolicy {
        self.policy
    }

    /// Look up a parameter value.
    pub fn lookup(&self, index: &Index) -> Lookup<'a> {
        self.params.lookup(index)
    }

    /// Resolve the rule key for a number.
    pub fn rule_key(&self, n: f64) -> String {
        self.resolver.rule_key(self.language, n)
    }
}
