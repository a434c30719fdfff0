// 💰 Amount Resolver - Currency-marked numerals, then bare ones
// Leaves the amount unresolved rather than erroring; date tokens are excluded.

use regex::Regex;

use crate::nlp::{EntityLabel, EntitySpan};
use crate::observe::{Observer, Signal};

/// Resolves a monetary amount from text.
///
/// The numeral grammar accepts comma-separated clusters of one to three
/// digits with an optional two-decimal fraction. It deliberately cannot tell
/// Western thousands-grouping apart from other regional grouping conventions;
/// the first grammar match is taken as written.
pub struct AmountResolver {
    currency: Regex,
    bare: Regex,
}

impl AmountResolver {
    pub fn new() -> Self {
        AmountResolver {
            currency: Regex::new(r"[$£€₹]\s*(\d{1,3}(?:,\d{1,3})*(?:\.\d{1,2})?)").unwrap(),
            bare: Regex::new(r"\b\d{1,3}(?:,\d{1,3})*(?:\.\d{1,2})?\b").unwrap(),
        }
    }

    /// Resolve an amount, or `None` when the text offers nothing usable
    pub fn resolve(
        &self,
        text: &str,
        spans: &[EntitySpan],
        observer: &dyn Observer,
    ) -> Option<f64> {
        // (a) first currency-prefixed numeral
        if let Some(caps) = self.currency.captures(text) {
            if let Ok(value) = caps[1].replace(',', "").parse::<f64>() {
                return Some(value);
            }
        }

        // (b) first bare numeral that is not part of a recognized date span
        let date_text = spans
            .iter()
            .filter(|s| s.label == EntityLabel::Date)
            .map(|s| s.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        for m in self.bare.find_iter(text) {
            if date_text.contains(&m.as_str().to_lowercase()) {
                continue;
            }
            if let Ok(value) = m.as_str().replace(',', "").parse::<f64>() {
                return Some(value);
            }
        }

        // (c) unresolved, by design not an error
        observer.record(Signal::AmountUnresolved);
        None
    }
}

impl Default for AmountResolver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{NullObserver, RecordingObserver};

    fn date_span(text: &str) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label: EntityLabel::Date,
            offset: 0,
        }
    }

    #[test]
    fn test_currency_marked_amount_wins() {
        let resolver = AmountResolver::new();
        let amount = resolver.resolve("$1,500.50 plus another 300", &[], &NullObserver);

        assert_eq!(amount, Some(1500.50));
    }

    #[test]
    fn test_rupee_symbol_with_spacing() {
        let resolver = AmountResolver::new();
        let amount = resolver.resolve("received ₹ 2,000 today", &[], &NullObserver);

        assert_eq!(amount, Some(2000.0));
    }

    #[test]
    fn test_bare_numeral_fallback_skips_date_tokens() {
        let resolver = AmountResolver::new();
        let amount = resolver.resolve(
            "Paid 500 on 1st January 2024",
            &[date_span("1st january 2024")],
            &NullObserver,
        );

        assert_eq!(amount, Some(500.0));
    }

    #[test]
    fn test_only_date_numerals_leaves_amount_unresolved() {
        let resolver = AmountResolver::new();
        let observer = RecordingObserver::new();
        let amount = resolver.resolve(
            "Paid rent on 1 January 2024",
            &[date_span("1 january 2024")],
            &observer,
        );

        assert_eq!(amount, None);
        assert_eq!(observer.signals(), vec![Signal::AmountUnresolved]);
    }

    #[test]
    fn test_no_numerals_at_all() {
        let resolver = AmountResolver::new();
        let observer = RecordingObserver::new();

        assert_eq!(resolver.resolve("paid the rent", &[], &observer), None);
        assert_eq!(observer.signals(), vec![Signal::AmountUnresolved]);
    }
}
