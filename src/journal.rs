// 📒 Journal Builder - One immutable record per sentence
// Orchestrates the extractor and the three resolvers; no retries, no
// partial output.

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountCatalog, AccountNormalizer};
use crate::amounts::AmountResolver;
use crate::dates::DateResolver;
use crate::nlp::{title_case, EntityExtractor, EntityLabel};
use crate::observe::Observer;
use crate::rules::TransactionClassifier;

// ============================================================================
// RECORD
// ============================================================================

/// Final double-entry bookkeeping record.
///
/// The date is always resolved and both accounts are always canonical names
/// (possibly the miscellaneous default); only the amount may be unresolved.
/// Immutable after construction and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: Option<f64>,
    pub debit_account: String,
    pub credit_account: String,
    pub description: String,
}

// ============================================================================
// BUILDER
// ============================================================================

/// Turns one free-text sentence into one `TransactionRecord`.
///
/// Holds only read-only state (catalog, compiled patterns, the injected
/// extractor and observer), so a single instance is safe to share across
/// concurrent calls.
pub struct TransactionBuilder {
    catalog: AccountCatalog,
    extractor: Box<dyn EntityExtractor>,
    observer: Box<dyn Observer>,
    dates: DateResolver,
    amounts: AmountResolver,
}

impl TransactionBuilder {
    pub fn new(extractor: Box<dyn EntityExtractor>, observer: Box<dyn Observer>) -> Self {
        TransactionBuilder {
            catalog: AccountCatalog::with_defaults(),
            extractor,
            observer,
            dates: DateResolver::new(),
            amounts: AmountResolver::new(),
        }
    }

    /// Classify one sentence, using the local calendar date as the
    /// date of last resort.
    pub fn build(&self, text: &str) -> Result<TransactionRecord> {
        self.build_with_date(text, Local::now().date_naive())
    }

    /// Classify one sentence against an explicit processing date.
    pub fn build_with_date(&self, text: &str, today: NaiveDate) -> Result<TransactionRecord> {
        let text = text.trim();
        if text.is_empty() {
            bail!("empty transaction text");
        }

        // single blocking call into the injected recognizer
        let spans = self.extractor.extract_entities(text);
        let tokens = self.extractor.tag_tokens(text);

        let entities: Vec<String> = spans
            .iter()
            .filter(|s| matches!(s.label, EntityLabel::Person | EntityLabel::Org))
            .map(|s| title_case(&s.text))
            .collect();

        let date = self.dates.resolve(text, &spans, today, self.observer.as_ref());
        let amount = self.amounts.resolve(text, &spans, self.observer.as_ref());

        let normalizer = AccountNormalizer::new(&self.catalog, self.observer.as_ref());
        let classifier = TransactionClassifier::new(&normalizer);
        let classification = classifier.classify(text, &entities, &tokens);

        Ok(TransactionRecord {
            date,
            amount,
            debit_account: classification.debit,
            credit_account: classification.credit,
            description: classification.narration,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{EntitySpan, PosTag, Token};
    use crate::observe::{NullObserver, RecordingObserver, Signal};
    use std::sync::Arc;

    /// Scripted collaborator: returns exactly the spans and tokens it was
    /// built with, decoupling these tests from any real model.
    struct StubExtractor {
        spans: Vec<EntitySpan>,
        tokens: Vec<Token>,
    }

    impl StubExtractor {
        fn new(spans: Vec<EntitySpan>, tokens: Vec<Token>) -> Self {
            StubExtractor { spans, tokens }
        }

        fn empty() -> Self {
            Self::new(Vec::new(), Vec::new())
        }
    }

    impl EntityExtractor for StubExtractor {
        fn extract_entities(&self, _text: &str) -> Vec<EntitySpan> {
            self.spans.clone()
        }

        fn tag_tokens(&self, _text: &str) -> Vec<Token> {
            self.tokens.clone()
        }
    }

    fn date_span(text: &str, offset: usize) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label: EntityLabel::Date,
            offset,
        }
    }

    fn person_span(text: &str, offset: usize) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label: EntityLabel::Person,
            offset,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_shop_rent_sentence_end_to_end() {
        let extractor = StubExtractor::new(vec![date_span("1st january 2024", 26)], Vec::new());
        let builder = TransactionBuilder::new(Box::new(extractor), Box::new(NullObserver));

        let record = builder
            .build_with_date("Paid rent for the shop on 1st January 2024, $500", today())
            .unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.amount, Some(500.0));
        assert_eq!(record.debit_account, "Rent Expense A/c");
        assert_eq!(record.credit_account, "Cash A/c");
        assert_eq!(record.description, "Being rent paid for the shop");
    }

    #[test]
    fn test_date_only_numerals_leave_amount_null() {
        let extractor = StubExtractor::new(vec![date_span("1 january 2024", 17)], Vec::new());
        let builder = TransactionBuilder::new(Box::new(extractor), Box::new(NullObserver));

        let record = builder
            .build_with_date("Paid the rent on 1 January 2024", today())
            .unwrap();

        assert_eq!(record.amount, None);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let builder =
            TransactionBuilder::new(Box::new(StubExtractor::empty()), Box::new(NullObserver));

        assert!(builder.build("").is_err());
        assert!(builder.build("   ").is_err());
    }

    #[test]
    fn test_uncategorized_sentence_uses_defaults_with_one_account_signal() {
        let observer = Arc::new(RecordingObserver::new());
        let builder = TransactionBuilder::new(
            Box::new(StubExtractor::empty()),
            Box::new(SharedObserver(observer.clone())),
        );

        let record = builder.build_with_date("Something happened", today()).unwrap();

        assert_eq!(record.date, today());
        assert_eq!(record.amount, None);
        assert_eq!(record.debit_account, "Cash A/c");
        assert_eq!(record.credit_account, "Miscellaneous Expense A/c");
        assert_eq!(observer.unrecognized_count(), 1);
    }

    #[test]
    fn test_withdrawal_by_known_name() {
        let extractor = StubExtractor::new(vec![person_span("tom", 0)], Vec::new());
        let builder = TransactionBuilder::new(Box::new(extractor), Box::new(NullObserver));

        let record = builder
            .build_with_date("Tom withdrew $100 for personal use", today())
            .unwrap();

        assert_eq!(record.amount, Some(100.0));
        assert_eq!(record.debit_account, "Drawings A/c");
        assert_eq!(record.credit_account, "Cash A/c");
        assert_eq!(record.description, "Being cash withdrawn by Tom for personal use");
    }

    #[test]
    fn test_purchase_uses_tagged_noun() {
        let tokens = vec![
            Token { text: "purchased".to_string(), pos: PosTag::Verb },
            Token { text: "furniture".to_string(), pos: PosTag::Noun },
            Token { text: "for".to_string(), pos: PosTag::Other },
            Token { text: "cash".to_string(), pos: PosTag::Noun },
        ];
        let extractor = StubExtractor::new(Vec::new(), tokens);
        let builder = TransactionBuilder::new(Box::new(extractor), Box::new(NullObserver));

        let record = builder
            .build_with_date("Purchased furniture for cash, $1,200", today())
            .unwrap();

        assert_eq!(record.amount, Some(1200.0));
        assert_eq!(record.debit_account, "Furniture A/c");
        assert_eq!(record.credit_account, "Cash A/c");
    }

    #[test]
    fn test_identical_input_yields_identical_record() {
        let text = "Received $300 from sales on 2 February 2024";
        let make_builder = || {
            TransactionBuilder::new(
                Box::new(StubExtractor::new(
                    vec![date_span("2 february 2024", 28)],
                    Vec::new(),
                )),
                Box::new(NullObserver),
            )
        };

        let first = make_builder().build_with_date(text, today()).unwrap();
        let second = make_builder().build_with_date(text, today()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_record_serializes_to_boundary_shape() {
        let builder =
            TransactionBuilder::new(Box::new(StubExtractor::empty()), Box::new(NullObserver));
        let record = builder.build_with_date("Something happened", today()).unwrap();

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["date"], "2025-06-15");
        assert!(json["amount"].is_null());
        assert_eq!(json["debit_account"], "Cash A/c");
    }

    /// Adapter so a test can keep a handle on the recording observer the
    /// builder owns
    struct SharedObserver(Arc<RecordingObserver>);

    impl crate::observe::Observer for SharedObserver {
        fn record(&self, signal: Signal) {
            self.0.record(signal);
        }
    }
}
