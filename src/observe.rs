// 📡 Observability Signals - Structured diagnostics for the resolution pipeline
// Every fallback the resolvers take is reported here instead of printed ad hoc

use chrono::NaiveDate;

// ============================================================================
// SIGNALS
// ============================================================================

/// Which fallback tier produced a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTier {
    /// Pattern scan over the raw text, after no entity span parsed
    Regex,
    /// Caller-supplied processing date, after the pattern scan also failed
    ProcessingDate,
}

/// Non-fatal diagnostic events emitted during classification.
///
/// None of these indicate an error: every resolution step terminates with a
/// value, and the signal records which default it fell back to.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The date came from a fallback tier instead of an entity span
    DateFallback { tier: DateTier, resolved: NaiveDate },

    /// No currency-marked or bare numeral survived the amount scan
    AmountUnresolved,

    /// A label had no catalog match and was routed to the default account
    UnrecognizedAccount { input: String },
}

// ============================================================================
// OBSERVER
// ============================================================================

/// Sink for classification signals.
///
/// Shared read-only across concurrent classification calls, so implementations
/// must be `Send + Sync`.
pub trait Observer: Send + Sync {
    fn record(&self, signal: Signal);
}

/// Forwards signals to the `log` facade.
///
/// Unrecognized accounts are warnings (they usually mean a missing alias in
/// the chart of accounts); the date/amount fallbacks are expected operation
/// and only logged at debug level.
pub struct LogObserver;

impl Observer for LogObserver {
    fn record(&self, signal: Signal) {
        match signal {
            Signal::DateFallback { tier, resolved } => {
                log::debug!("date resolved via {:?} fallback: {}", tier, resolved);
            }
            Signal::AmountUnresolved => {
                log::debug!("no amount found, leaving it unresolved");
            }
            Signal::UnrecognizedAccount { input } => {
                log::warn!(
                    "unrecognized account '{}', defaulting to '{}'",
                    input,
                    crate::accounts::DEFAULT_ACCOUNT
                );
            }
        }
    }
}

/// Discards every signal
pub struct NullObserver;

impl Observer for NullObserver {
    fn record(&self, _signal: Signal) {}
}

// ============================================================================
// TEST SUPPORT
// ============================================================================

/// Captures signals for assertions
#[cfg(test)]
pub struct RecordingObserver {
    signals: std::sync::Mutex<Vec<Signal>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn new() -> Self {
        RecordingObserver {
            signals: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.signals.lock().unwrap().clone()
    }

    pub fn unrecognized_count(&self) -> usize {
        self.signals()
            .iter()
            .filter(|s| matches!(s, Signal::UnrecognizedAccount { .. }))
            .count()
    }
}

#[cfg(test)]
impl Observer for RecordingObserver {
    fn record(&self, signal: Signal) {
        self.signals.lock().unwrap().push(signal);
    }
}
