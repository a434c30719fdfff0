// 🏦 Account Catalog - Fixed chart of accounts
// Canonical names plus every alias spelling that maps onto them

use crate::observe::{Observer, Signal};

// ============================================================================
// CATALOG
// ============================================================================

/// Canonical account routed to when nothing in the catalog matches
pub const DEFAULT_ACCOUNT: &str = "Miscellaneous Expense A/c";

/// One canonical account and its recognized alias spellings (lower-cased)
#[derive(Debug, Clone)]
pub struct AccountEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
}

/// Static chart of accounts.
///
/// Loaded once at startup and read-only afterwards; safe to share across
/// arbitrarily many concurrent classification calls.
pub struct AccountCatalog {
    entries: Vec<AccountEntry>,
}

impl AccountCatalog {
    /// Catalog with the standard chart of accounts pre-loaded
    pub fn with_defaults() -> Self {
        let entries = vec![
            entry(
                "Rent Expense A/c",
                &[
                    "rent a/c",
                    "shop rent a/c",
                    "rental expense a/c",
                    "rent",
                    "shop rent",
                    "lease a/c",
                    "rent expense",
                ],
            ),
            entry(
                "Drawings A/c",
                &[
                    "drawings",
                    "withdrawal",
                    "personal withdrawal a/c",
                    "owner's drawings a/c",
                    "david's drawings a/c",
                    "david",
                    "david's capital a/c",
                    "tom",
                    "tom's drawings a/c",
                ],
            ),
            entry("Cash A/c", &["cash", "cash in hand a/c", "cash account"]),
            entry("Furniture A/c", &["furniture", "furniture a/c"]),
            entry("Purchase A/c", &["purchase", "purchases", "goods", "stock"]),
            entry("Revenue A/c", &["revenue", "sales", "income"]),
            entry("Loan Payable A/c", &["loan payable", "loan", "borrowed"]),
            entry(
                "Capital A/c",
                &["capital", "owner's capital", "david's capital", "tom's capital"],
            ),
            entry("Creditors A/c", &["creditors", "accounts payable"]),
            entry(
                "Miscellaneous Expense A/c",
                &[
                    "expense a/c",
                    "cash expense a/c",
                    "general expense a/c",
                    "expenses",
                    "miscellaneous expense",
                ],
            ),
        ];

        AccountCatalog { entries }
    }

    /// Look up a label against canonical names and aliases.
    ///
    /// Matching is case- and surrounding-whitespace-insensitive; the first
    /// entry in catalog order wins. Returns `None` when nothing matches.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let needle = label.trim().to_lowercase();

        self.entries
            .iter()
            .find(|entry| {
                entry.canonical.to_lowercase() == needle
                    || entry.aliases.iter().any(|alias| *alias == needle)
            })
            .map(|entry| entry.canonical.as_str())
    }

    /// The designated fallback account
    pub fn default_account(&self) -> &str {
        DEFAULT_ACCOUNT
    }

    pub fn entries(&self) -> &[AccountEntry] {
        &self.entries
    }
}

impl Default for AccountCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn entry(canonical: &str, aliases: &[&str]) -> AccountEntry {
    AccountEntry {
        canonical: canonical.to_string(),
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
    }
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Maps free-text labels onto canonical account names; never fails.
///
/// Pure apart from the unrecognized-account signal.
pub struct AccountNormalizer<'a> {
    catalog: &'a AccountCatalog,
    observer: &'a dyn Observer,
}

impl<'a> AccountNormalizer<'a> {
    pub fn new(catalog: &'a AccountCatalog, observer: &'a dyn Observer) -> Self {
        AccountNormalizer { catalog, observer }
    }

    /// Canonical name for `label`, or the miscellaneous default when the
    /// catalog has no match for it.
    pub fn normalize(&self, label: &str) -> String {
        match self.catalog.resolve(label) {
            Some(canonical) => canonical.to_string(),
            None => {
                self.observer.record(Signal::UnrecognizedAccount {
                    input: label.to_string(),
                });
                self.catalog.default_account().to_string()
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
