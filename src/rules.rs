// 🏷️ Category Rules - Rules as Data
// Ordered trigger table plus the per-category debit/credit derivations

use crate::accounts::AccountNormalizer;
use crate::nlp::{title_case, PosTag, Token};

// ============================================================================
// RULE TABLE
// ============================================================================

/// Transaction-intent categories, named after the keyword families that
/// trigger them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Withdrawn,
    Rent,
    Purchased,
    Invested,
    Borrowed,
    Credit,
    Debit,
}

/// One row of the rule table: a category and the phrases that trigger it
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub triggers: &'static [&'static str],
}

/// Declared in precedence order: the first rule with a trigger present in the
/// lower-cased text governs, regardless of where in the sentence the trigger
/// sits or whether a later rule's trigger is also present.
pub const RULE_TABLE: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Withdrawn,
        triggers: &[
            "withdrawn",
            "withdrawal",
            "drew",
            "taken out",
            "for his own use",
            "for personal use",
        ],
    },
    CategoryRule {
        category: Category::Rent,
        triggers: &["rent", "paid as rent", "rental", "lease"],
    },
    CategoryRule {
        category: Category::Purchased,
        triggers: &["purchased", "bought", "acquired"],
    },
    CategoryRule {
        category: Category::Invested,
        triggers: &["invested", "capital", "started business", "contributed"],
    },
    CategoryRule {
        category: Category::Borrowed,
        triggers: &[
            "borrowed",
            "loan from",
            "lent by",
            "took loan",
            "financed by",
            "advanced by",
            "funded by",
            "borrowed from",
        ],
    },
    CategoryRule {
        category: Category::Credit,
        triggers: &[
            "received",
            "sale",
            "sold",
            "income",
            "revenue",
            "earned",
            "gained",
            "deposited",
            "collected",
            "credited",
            "refunded",
            "returned",
            "reimbursed",
            "transferred from",
            "acquired",
            "won",
            "got",
        ],
    },
    CategoryRule {
        category: Category::Debit,
        triggers: &[
            "paid",
            "expense",
            "spent",
            "cost",
            "charged",
            "withdrew",
            "deducted",
            "used",
            "donated",
            "sent",
            "transferred to",
            "disbursed",
            "expended",
            "lost",
            "owed",
        ],
    },
];

/// Context words that flip a rent payment between personal and business
const PERSONAL_RENT_INDICATORS: &[&str] = &["home", "house", "residence", "personal", "family"];
const BUSINESS_RENT_INDICATORS: &[&str] = &["shop", "office", "business", "store", "warehouse"];

/// Nouns the purchased rule recognizes as the acquired asset
const PURCHASABLE_NOUNS: &[&str] = &["furniture", "goods", "equipment", "stock"];

// ============================================================================
// RULE OUTCOME
// ============================================================================

/// Debit/credit/narration triple produced by a matched rule
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub debit: String,
    pub credit: String,
    pub narration: String,
}

/// Tagged result of evaluating a single rule against the text
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    NoMatch,
    Matched(Classification),
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Folds over the rule table and stops at the first `Matched`.
///
/// No partial state crosses rules: each rule either produces a complete
/// classification or nothing.
pub struct TransactionClassifier<'a> {
    normalizer: &'a AccountNormalizer<'a>,
}

impl<'a> TransactionClassifier<'a> {
    pub fn new(normalizer: &'a AccountNormalizer<'a>) -> Self {
        TransactionClassifier { normalizer }
    }

    /// Classify one sentence.
    ///
    /// `entities` are the title-cased PERSON/ORG names the extractor found,
    /// in document order; `tokens` carry the part-of-speech tags.
    pub fn classify(&self, text: &str, entities: &[String], tokens: &[Token]) -> Classification {
        let lowered = text.to_lowercase();

        for rule in RULE_TABLE {
            if let RuleOutcome::Matched(classification) =
                self.evaluate(rule, &lowered, entities, tokens)
            {
                return classification;
            }
        }

        self.fallback(entities)
    }

    /// Evaluate one rule: substring trigger check, then the category's
    /// derivation
    fn evaluate(
        &self,
        rule: &CategoryRule,
        lowered: &str,
        entities: &[String],
        tokens: &[Token],
    ) -> RuleOutcome {
        if !rule.triggers.iter().any(|trigger| lowered.contains(trigger)) {
            return RuleOutcome::NoMatch;
        }

        let classification = match rule.category {
            Category::Withdrawn => self.withdrawn(entities),
            Category::Rent => self.rent(lowered, entities),
            Category::Purchased => self.purchased(lowered, entities, tokens),
            Category::Invested => self.invested(entities),
            Category::Borrowed => self.borrowed(entities),
            Category::Credit => self.credit(entities),
            Category::Debit => self.debit(lowered, entities),
        };

        RuleOutcome::Matched(classification)
    }

    // ------------------------------------------------------------------------
    // Per-category derivations
    // ------------------------------------------------------------------------

    /// Cash taken out of the business. The catalog maps known personal names
    /// onto the Drawings account.
    fn withdrawn(&self, entities: &[String]) -> Classification {
        match entities.first() {
            Some(name) => Classification {
                debit: self.normalizer.normalize(name),
                credit: self.normalizer.normalize("Cash"),
                narration: format!("Being cash withdrawn by {} for personal use", name),
            },
            None => Classification {
                debit: self.normalizer.normalize("Drawings"),
                credit: self.normalizer.normalize("Cash"),
                narration: "Being cash withdrawn for personal use".to_string(),
            },
        }
    }

    /// Personal indicators are checked before business ones; ambiguous rent
    /// is treated as business rent.
    fn rent(&self, lowered: &str, entities: &[String]) -> Classification {
        let personal = PERSONAL_RENT_INDICATORS.iter().any(|w| lowered.contains(w));
        let business = BUSINESS_RENT_INDICATORS.iter().any(|w| lowered.contains(w));

        if personal {
            Classification {
                debit: self
                    .normalizer
                    .normalize(entities.first().map(String::as_str).unwrap_or("Drawings")),
                credit: self.normalizer.normalize("Cash"),
                narration: "Being rent paid for the home, treated as personal expense".to_string(),
            }
        } else if business {
            Classification {
                debit: self.normalizer.normalize("Rent"),
                credit: self.normalizer.normalize("Cash"),
                narration: "Being rent paid for the shop".to_string(),
            }
        } else {
            Classification {
                debit: self.normalizer.normalize("Rent"),
                credit: self.normalizer.normalize("Cash"),
                narration: "Being rent paid (unspecified purpose)".to_string(),
            }
        }
    }

    /// The first tagged noun among the purchasable assets becomes the debit
    /// side; the credit side depends on whether the purchase was for cash or
    /// on credit.
    fn purchased(&self, lowered: &str, entities: &[String], tokens: &[Token]) -> Classification {
        let item = tokens
            .iter()
            .find(|t| {
                t.pos == PosTag::Noun
                    && PURCHASABLE_NOUNS.contains(&t.text.to_lowercase().as_str())
            })
            .map(|t| title_case(&t.text));

        let debit = match &item {
            Some(noun) => self.normalizer.normalize(noun),
            None => self.normalizer.normalize("Purchase"),
        };

        let item_label = item
            .as_ref()
            .map(|noun| noun.to_lowercase())
            .unwrap_or_else(|| "goods".to_string());

        if lowered.contains("cash") {
            Classification {
                debit,
                credit: self.normalizer.normalize("Cash"),
                narration: format!("Being {} purchased for cash", item_label),
            }
        } else if lowered.contains("credit") {
            Classification {
                debit,
                credit: self
                    .normalizer
                    .normalize(entities.first().map(String::as_str).unwrap_or("Creditors")),
                narration: format!("Being {} purchased on credit", item_label),
            }
        } else {
            Classification {
                debit,
                credit: self.normalizer.normalize("Cash"),
                narration: format!("Being {} purchased", item_label),
            }
        }
    }

    /// Owner investment. The contributor's name suffixed with "'s Capital" is
    /// looked up as a single label against the catalog.
    fn invested(&self, entities: &[String]) -> Classification {
        match entities.first() {
            Some(name) => Classification {
                debit: self.normalizer.normalize("Cash"),
                credit: self.normalizer.normalize(&format!("{}'s Capital", name)),
                narration: format!(
                    "Being amount invested by {} as capital in the business",
                    name
                ),
            },
            None => Classification {
                debit: self.normalizer.normalize("Cash"),
                credit: self.normalizer.normalize("Capital"),
                narration: "Being amount invested as capital in the business".to_string(),
            },
        }
    }

    fn borrowed(&self, entities: &[String]) -> Classification {
        Classification {
            debit: self.normalizer.normalize("Cash"),
            credit: self
                .normalizer
                .normalize(entities.first().map(String::as_str).unwrap_or("Loan Payable")),
            narration: format!(
                "Being amount borrowed from {}",
                entities.first().map(String::as_str).unwrap_or("loan payable")
            ),
        }
    }

    fn credit(&self, entities: &[String]) -> Classification {
        Classification {
            debit: self.normalizer.normalize("Cash"),
            credit: self
                .normalizer
                .normalize(entities.first().map(String::as_str).unwrap_or("Revenue")),
            narration: format!(
                "Being amount received from {}",
                entities.first().map(String::as_str).unwrap_or("revenue")
            ),
        }
    }

    /// Money going out. When "paid" appears and a detected name follows it in
    /// the sentence, that name takes the debit side.
    fn debit(&self, lowered: &str, entities: &[String]) -> Classification {
        if let Some(paid_idx) = lowered.find("paid") {
            let tail = &lowered[paid_idx..];
            if let Some(name) = entities.iter().find(|e| tail.contains(&e.to_lowercase())) {
                return Classification {
                    debit: self.normalizer.normalize(name),
                    credit: self.normalizer.normalize("Cash"),
                    narration: format!("Being amount paid to {} for expenses", name),
                };
            }
        }

        Classification {
            debit: self
                .normalizer
                .normalize(entities.first().map(String::as_str).unwrap_or("Cash Expense")),
            credit: self.normalizer.normalize("Cash"),
            narration: "Being amount paid for expenses".to_string(),
        }
    }

    /// Applied when no rule matched at all
    fn fallback(&self, entities: &[String]) -> Classification {
        match entities.first() {
            Some(name) => Classification {
                debit: self.normalizer.normalize(name),
                credit: self.normalizer.normalize("General Account"),
                narration: format!("Being transaction with {}", name),
            },
            None => Classification {
                debit: self.normalizer.normalize("Cash"),
                credit: self.normalizer.normalize("General Account"),
                narration: "Being general transaction".to_string(),
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
