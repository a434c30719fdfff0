// Journalizer - Core Library
// Free-text financial sentences in, double-entry journal records out.
// Exposes all modules for use in the CLI, the API server, and tests.

pub mod accounts;
pub mod amounts;
pub mod dates;
pub mod journal;
pub mod nlp;
pub mod observe;
pub mod rules;

// Re-export commonly used types
pub use accounts::{AccountCatalog, AccountEntry, AccountNormalizer, DEFAULT_ACCOUNT};
pub use amounts::AmountResolver;
pub use dates::DateResolver;
pub use journal::{TransactionBuilder, TransactionRecord};
pub use nlp::{
    title_case, EntityExtractor, EntityLabel, EntitySpan, LexiconExtractor, PosTag, Token,
};
pub use observe::{DateTier, LogObserver, NullObserver, Observer, Signal};
pub use rules::{
    Category, CategoryRule, Classification, RuleOutcome, TransactionClassifier, RULE_TABLE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
