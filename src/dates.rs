// 📅 Date Resolver - Entity spans, then pattern scan, then the clock
// Three ordered tiers; resolution never fails.

use chrono::NaiveDate;
use regex::Regex;

use crate::nlp::{EntityLabel, EntitySpan};
use crate::observe::{DateTier, Observer, Signal};

/// Date shapes the fallback scan recognizes in raw text:
/// "1st January 2024" / "30 December 2023" or "January 1, 2024"
pub(crate) const DATE_PATTERN: &str =
    r"\b\d{1,2}(?:st|nd|rd|th)? \w+ \d{4}\b|\w+ \d{1,2}, \d{4}";

/// Calendar formats tried against a cleaned span, in order. Slash dates are
/// read month-first when ambiguous.
const SPAN_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
];

/// Resolves a calendar date from text and DATE-labeled entity spans.
///
/// Tier order is significant: entity spans always beat the pattern scan,
/// which always beats the processing-date default.
pub struct DateResolver {
    pattern: Regex,
    ordinal: Regex,
}

impl DateResolver {
    pub fn new() -> Self {
        DateResolver {
            pattern: Regex::new(DATE_PATTERN).unwrap(),
            ordinal: Regex::new(r"(\d+)(?:st|nd|rd|th)").unwrap(),
        }
    }

    /// Resolve a date; `today` is the caller's processing date and is only
    /// used when both earlier tiers come up empty.
    pub fn resolve(
        &self,
        text: &str,
        spans: &[EntitySpan],
        today: NaiveDate,
        observer: &dyn Observer,
    ) -> NaiveDate {
        // (a) first DATE span that parses wins
        for span in spans.iter().filter(|s| s.label == EntityLabel::Date) {
            if let Some(date) = self.parse_span(&span.text) {
                return date;
            }
        }

        // (b) first pattern match in the raw text
        if let Some(m) = self.pattern.find(text) {
            if let Some(date) = self.parse_span(m.as_str()) {
                observer.record(Signal::DateFallback {
                    tier: DateTier::Regex,
                    resolved: date,
                });
                return date;
            }
        }

        // (c) the clock default
        observer.record(Signal::DateFallback {
            tier: DateTier::ProcessingDate,
            resolved: today,
        });
        today
    }

    /// Strip ordinal suffixes ("30th" → "30") and try the format list
    fn parse_span(&self, raw: &str) -> Option<NaiveDate> {
        let cleaned = self.ordinal.replace_all(raw.trim(), "$1");

        SPAN_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
