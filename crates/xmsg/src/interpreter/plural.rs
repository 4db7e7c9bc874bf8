//! Plural rule resolution for choice tokens.
//!
//! A choice token asks a [`PluralRuleResolver`] for the rule key of a number
//! in a language and then selects the style with that key. Two resolvers are
//! provided:
//!
//! - [`SingularPlural`], the default: `1` is "singular", everything else is
//!   "plural", including fractions such as `1.5`.
//! - [`CldrPlurals`], which returns CLDR cardinal categories ("zero", "one",
//!   "two", "few", "many", "other"). English has "one" and "other", while
//!   Russian has "one", "few", "many", and "other".
//!
//! CLDR plural rules are cached per thread per language to avoid re-creating
//! `PluralRules` instances on every call.

use std::cell::RefCell;

use icu_locale_core::locale;
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules};

/// Maps a number in a language to a rule key.
///
/// The number is passed unrounded so that fractional values can select
/// their own category. Implemented by the built-in resolvers and by any
/// `Fn(&str, f64) -> String` closure.
pub trait PluralRuleResolver {
    fn rule_key(&self, language: &str, n: f64) -> String;
}

impl<F> PluralRuleResolver for F
where
    F: Fn(&str, f64) -> String,
{
    fn rule_key(&self, language: &str, n: f64) -> String {
        self(language, n)
    }
}

/// The default resolver: exactly 1 is "singular", anything else is "plural".
#[derive(Debug, Clone, Copy, Default)]
pub struct SingularPlural;

impl PluralRuleResolver for SingularPlural {
    fn rule_key(&self, _language: &str, n: f64) -> String {
        let key = if n.total_cmp(&1.0).is_eq() {
            "singular"
        } else {
            "plural"
        };
        key.to_string()
    }
}

/// Resolves CLDR cardinal plural categories using ICU4X data.
///
/// Fractional values use the CLDR decimal operands, so `1.5` is "other" in
/// English. Values that are not finite resolve to "other".
#[derive(Debug, Clone, Copy, Default)]
pub struct CldrPlurals;

impl PluralRuleResolver for CldrPlurals {
    fn rule_key(&self, language: &str, n: f64) -> String {
        match decimal_operands(n) {
            Some(operands) => plural_category(language, operands).to_string(),
            None => "other".to_string(),
        }
    }
}

/// Largest magnitude below which every integer is exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Build CLDR plural operands from a number.
///
/// Whole numbers become integer operands. Fractions go through their shortest
/// decimal form, which keeps the visible fraction digits the rules inspect.
fn decimal_operands(n: f64) -> Option<PluralOperands> {
    if !n.is_finite() {
        return None;
    }
    let magnitude = n.abs();
    if magnitude.fract() == 0.0 && magnitude < MAX_EXACT_INTEGER {
        return Some(PluralOperands::from(magnitude as u64));
    }
    magnitude.to_string().parse().ok()
}

/// Supported language codes for plural rule resolution.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "de", "el", "en", "es", "fa", "fr", "he", "hi", "id", "it", "ja", "ko", "nl", "pl",
    "pt", "ro", "ru", "th", "tr", "uk", "vi", "zh",
];

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by language code.
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Normalize a language code to a supported static string reference.
///
/// Region subtags are ignored (`pt-BR` resolves as `pt`). Returns `"en"` for
/// unrecognized codes.
fn normalize_lang(lang: &str) -> &'static str {
    let primary = lang.split(['-', '_']).next().unwrap_or(lang);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&code| code.eq_ignore_ascii_case(primary))
        .copied()
        .unwrap_or("en")
}

/// Build `PluralRules` for a normalized language code.
fn build_rules(lang: &'static str) -> Option<PluralRules> {
    let loc = match lang {
        "ru" => locale!("ru"),
        "ar" => locale!("ar"),
        "de" => locale!("de"),
        "es" => locale!("es"),
        "fr" => locale!("fr"),
        "it" => locale!("it"),
        "pt" => locale!("pt"),
        "ja" => locale!("ja"),
        "zh" => locale!("zh"),
        "ko" => locale!("ko"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "tr" => locale!("tr"),
        "uk" => locale!("uk"),
        "vi" => locale!("vi"),
        "th" => locale!("th"),
        "id" => locale!("id"),
        "el" => locale!("el"),
        "ro" => locale!("ro"),
        "fa" => locale!("fa"),
        "bn" => locale!("bn"),
        "hi" => locale!("hi"),
        "he" => locale!("he"),
        _ => locale!("en"),
    };
    PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into()).ok()
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Get the CLDR plural category for a number in a given language.
///
/// Accepts integers or prebuilt [`PluralOperands`]. Returns one of: "zero",
/// "one", "two", "few", "many", "other".
///
/// # Examples
///
/// ```
/// use xmsg::interpreter::plural_category;
///
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
///
/// assert_eq!(plural_category("ru", 1), "one");
/// assert_eq!(plural_category("ru", 2), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(lang: &str, n: impl Into<PluralOperands>) -> &'static str {
    let lang = normalize_lang(lang);
    let operands = n.into();
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(entry) = cache.iter().find(|(code, _)| *code == lang) {
            return category_str(entry.1.category_for(operands));
        }
        let Some(rules) = build_rules(lang) else {
            return "other";
        };
        let category = category_str(rules.category_for(operands));
        cache.push((lang, rules));
        category
    })
}
