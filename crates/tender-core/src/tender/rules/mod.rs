//! Rule-based field extractors for PepsiCo tenders.
//!
//! Every extractor is total: a miss yields `None`, never an error. Fields
//! with fallbacks are expressed as an ordered list of [`PatternRule`]s; the
//! first rule that produces a capture wins.

pub mod address;
pub mod dates;
pub mod load;
pub mod location;
pub mod patterns;
pub mod stop;
pub mod temp;

pub use address::{AddressExtractor, AddressSide, clean_address};
pub use dates::{DateExtractor, StopEvent, extract_delivery_date, extract_pickup_date};
pub use load::{LoadNumberExtractor, extract_load_number};
pub use location::{LocationIdExtractor, extract_location_id};
pub use patterns::*;
pub use stop::{StopIdExtractor, extract_stop_id};
pub use temp::{TempExtractor, extract_temp};

use regex::Regex;
use tracing::trace;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidate values of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Region of the document a rule is allowed to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole document.
    Full,
    /// Header region before the first column banner; requires the banner.
    BeforeBanner,
    /// From the first column banner up to the next one (or end of text).
    AfterBanner,
    /// From the first secondary marker up to the next one (or end of text).
    AfterSecondaryMarker,
}

impl Scope {
    /// Slice `text` to this scope, or `None` when the delimiting marker is absent.
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self {
            Scope::Full => Some(text),
            Scope::BeforeBanner => text.find(COLUMN_BANNER).map(|pos| &text[..pos]),
            Scope::AfterBanner => segment_after(text, COLUMN_BANNER),
            Scope::AfterSecondaryMarker => segment_after(text, SECONDARY_MARKER),
        }
    }
}

/// Text between the first `marker` and the following one (or end of text).
pub fn segment_after<'t>(text: &'t str, marker: &str) -> Option<&'t str> {
    text.split(marker).nth(1)
}

/// Capture produced by a [`PatternRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// Raw captured text (untrimmed).
    pub value: String,
}

/// A named pattern searched within one scope, yielding one capture group.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub name: &'static str,
    pub scope: Scope,
    pub pattern: &'static Regex,
    pub group: usize,
}

impl PatternRule {
    pub fn new(name: &'static str, scope: Scope, pattern: &'static Regex) -> Self {
        Self {
            name,
            scope,
            pattern,
            group: 1,
        }
    }

    /// Apply the rule to a document.
    pub fn apply(&self, text: &str) -> Option<RuleMatch> {
        let region = self.scope.slice(text)?;
        let caps = self.pattern.captures(region)?;
        let value = caps.get(self.group)?.as_str().to_string();
        trace!(rule = self.name, "rule matched");
        Some(RuleMatch {
            rule: self.name,
            value,
        })
    }
}

/// Apply rules in priority order and return the first capture.
pub fn first_match(rules: &[PatternRule], text: &str) -> Option<RuleMatch> {
    rules.iter().find_map(|rule| rule.apply(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_requires_banner() {
        let text = "header only";
        assert_eq!(Scope::Full.slice(text), Some(text));
        assert_eq!(Scope::BeforeBanner.slice(text), None);
        assert_eq!(Scope::AfterBanner.slice(text), None);
    }

    #[test]
    fn test_scope_after_banner_stops_at_next_banner() {
        let text = format!("head\n{b}\nfirst\n{b}\nsecond", b = COLUMN_BANNER);
        assert_eq!(Scope::BeforeBanner.slice(&text), Some("head\n"));
        assert_eq!(Scope::AfterBanner.slice(&text), Some("\nfirst\n"));
    }

    #[test]
    fn test_first_match_respects_priority() {
        let text = format!("PICKUP\n1/2/24\n{}\nPICKUP\n3/4/24", SECONDARY_MARKER);
        let rules = [
            PatternRule::new("secondary", Scope::AfterSecondaryMarker, &PICKUP_DATE),
            PatternRule::new("full", Scope::Full, &PICKUP_DATE),
        ];

        let hit = first_match(&rules, &text).unwrap();
        assert_eq!(hit.rule, "secondary");
        assert_eq!(hit.value, "3/4/24");
    }

    #[test]
    fn test_first_match_none() {
        let rules = [PatternRule::new("full", Scope::Full, &LOAD_NUMBER)];
        assert!(first_match(&rules, "nothing here").is_none());
    }
}
