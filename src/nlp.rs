// 🧠 Entity Extraction Contract - Injected NLP collaborator
// The statistical recognizer lives outside this crate; the core only consumes
// labeled spans and token tags through the EntityExtractor trait.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dates::DATE_PATTERN;

// ============================================================================
// SPAN AND TOKEN TYPES
// ============================================================================

/// Label attached to a recognized span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Date,
    Person,
    Org,
}

/// A labeled substring of the input, produced fresh per call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    /// Byte offset of the span in the (lower-cased) input
    pub offset: usize,
}

/// Coarse part-of-speech tag; the classifier only ever asks "is this a noun"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub pos: PosTag,
}

// ============================================================================
// EXTRACTOR TRAIT
// ============================================================================

/// Injected entity/POS recognizer.
///
/// Implementations must return spans in document order. The call is treated
/// as blocking; the core has no other suspension point.
pub trait EntityExtractor: Send + Sync {
    fn extract_entities(&self, text: &str) -> Vec<EntitySpan>;

    fn tag_tokens(&self, text: &str) -> Vec<Token>;
}

// ============================================================================
// LEXICON EXTRACTOR
// ============================================================================

/// Deterministic lexicon/pattern stand-in for a statistical model.
///
/// Dates are matched with the same pattern the date resolver uses; people and
/// organizations come from a configurable name lexicon. Good enough for the
/// demo binaries and for tests; real deployments implement `EntityExtractor`
/// against their own recognizer.
pub struct LexiconExtractor {
    people: Vec<String>,
    orgs: Vec<String>,
    date_re: Regex,
}

const NOUN_WORDS: &[&str] = &[
    "furniture", "goods", "equipment", "stock", "cash", "rent", "shop", "office",
    "house", "home", "loan", "capital", "business", "money", "amount",
];

const VERB_WORDS: &[&str] = &[
    "paid", "received", "purchased", "bought", "sold", "invested", "borrowed",
    "withdrew", "drew", "spent", "deposited", "started", "contributed", "earned",
];

impl LexiconExtractor {
    pub fn new(people: Vec<String>, orgs: Vec<String>) -> Self {
        LexiconExtractor {
            people: people.into_iter().map(|n| n.to_lowercase()).collect(),
            orgs: orgs.into_iter().map(|n| n.to_lowercase()).collect(),
            date_re: Regex::new(DATE_PATTERN).unwrap(),
        }
    }

    /// Extractor pre-loaded with the personal names the chart of accounts
    /// knows about
    pub fn with_defaults() -> Self {
        Self::new(vec!["david".to_string(), "tom".to_string()], Vec::new())
    }
}

impl Default for LexiconExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl EntityExtractor for LexiconExtractor {
    fn extract_entities(&self, text: &str) -> Vec<EntitySpan> {
        let lowered = text.to_lowercase();
        let mut spans = Vec::new();

        for m in self.date_re.find_iter(&lowered) {
            spans.push(EntitySpan {
                text: m.as_str().to_string(),
                label: EntityLabel::Date,
                offset: m.start(),
            });
        }

        for (names, label) in [(&self.people, EntityLabel::Person), (&self.orgs, EntityLabel::Org)] {
            for name in names {
                for offset in word_occurrences(&lowered, name) {
                    spans.push(EntitySpan {
                        text: name.clone(),
                        label,
                        offset,
                    });
                }
            }
        }

        spans.sort_by_key(|span| span.offset);
        spans
    }

    fn tag_tokens(&self, text: &str) -> Vec<Token> {
        text.to_lowercase()
            .split_whitespace()
            .filter_map(|raw| {
                let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
                if word.is_empty() {
                    return None;
                }

                let pos = if NOUN_WORDS.contains(&word) {
                    PosTag::Noun
                } else if VERB_WORDS.contains(&word) {
                    PosTag::Verb
                } else {
                    PosTag::Other
                };

                Some(Token {
                    text: word.to_string(),
                    pos,
                })
            })
            .collect()
    }
}

/// Offsets of whole-word occurrences of `needle` in `haystack`
fn word_occurrences(haystack: &str, needle: &str) -> Vec<usize> {
    let mut offsets = Vec::new();

    for (idx, _) in haystack.match_indices(needle) {
        let prev_alnum = haystack[..idx]
            .chars()
            .next_back()
            .map_or(false, |c| c.is_alphanumeric());
        let next_alnum = haystack[idx + needle.len()..]
            .chars()
            .next()
            .map_or(false, |c| c.is_alphanumeric());

        if !prev_alnum && !next_alnum {
            offsets.push(idx);
        }
    }

    offsets
}

/// Capitalize the first letter of each whitespace-separated word
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_extractor_finds_dates_and_people() {
        let extractor = LexiconExtractor::with_defaults();
        let spans = extractor.extract_entities("Tom paid rent on 1st January 2024");

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].label, EntityLabel::Person);
        assert_eq!(spans[0].text, "tom");
        assert_eq!(spans[0].offset, 0);
        assert_eq!(spans[1].label, EntityLabel::Date);
        assert_eq!(spans[1].text, "1st january 2024");
    }

    #[test]
    fn test_name_matching_respects_word_boundaries() {
        let extractor = LexiconExtractor::with_defaults();
        let spans = extractor.extract_entities("Payment is due tomorrow");

        assert!(spans.is_empty(), "'tomorrow' must not match 'tom': {:?}", spans);
    }

    #[test]
    fn test_tag_tokens_marks_known_nouns() {
        let extractor = LexiconExtractor::with_defaults();
        let tokens = extractor.tag_tokens("Purchased furniture for cash.");

        assert_eq!(tokens[0].text, "purchased");
        assert_eq!(tokens[0].pos, PosTag::Verb);
        assert_eq!(tokens[1].text, "furniture");
        assert_eq!(tokens[1].pos, PosTag::Noun);
        // trailing period stripped
        assert_eq!(tokens[3].text, "cash");
        assert_eq!(tokens[3].pos, PosTag::Noun);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("david"), "David");
        assert_eq!(title_case("acme supplies"), "Acme Supplies");
    }
}
