//! Invoice numbering.
//!
//! Numbers come from an explicit [`InvoiceSequence`] rather than a hidden
//! counter on the invoice type. A process-scoped instance is available through
//! [`InvoiceSequence::process`]; callers that need isolated numbering (tests,
//! per-tenant books) own their own sequence.

use core::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Sequence number of an invoice. Unique and strictly increasing per sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceNumber(u64);

impl InvoiceNumber {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<InvoiceNumber> for u64 {
    fn from(value: InvoiceNumber) -> Self {
        value.0
    }
}

/// Thread-safe generator of invoice numbers.
///
/// The first number handed out is 1 (or the configured start). Every call to
/// [`next`](Self::next) returns a value strictly greater than all previous ones,
/// even when invoices are created from several threads at once.
#[derive(Debug)]
pub struct InvoiceSequence {
    last: AtomicU64,
}

static PROCESS_SEQUENCE: InvoiceSequence = InvoiceSequence::new();

impl InvoiceSequence {
    /// A fresh sequence whose first number is 1.
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// A fresh sequence whose first number is `first`.
    ///
    /// `first` of 0 is treated as 1; number 0 is never issued.
    pub const fn starting_at(first: u64) -> Self {
        let last = if first == 0 { 0 } else { first - 1 };
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// The sequence shared by every invoice created through `Invoice::new`.
    pub fn process() -> &'static InvoiceSequence {
        &PROCESS_SEQUENCE
    }

    /// Reserve the next number.
    pub fn next(&self) -> InvoiceNumber {
        let number = self.last.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(number, "invoice number issued");
        InvoiceNumber(number)
    }

    /// The most recently issued number, if any.
    pub fn last_issued(&self) -> Option<InvoiceNumber> {
        match self.last.load(Ordering::SeqCst) {
            0 => None,
            n => Some(InvoiceNumber(n)),
        }
    }
}

impl Default for InvoiceSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fresh_sequence_starts_at_one() {
        let seq = InvoiceSequence::new();
        assert_eq!(seq.last_issued(), None);
        assert_eq!(seq.next().get(), 1);
        assert_eq!(seq.next().get(), 2);
        assert_eq!(seq.last_issued().map(InvoiceNumber::get), Some(2));
    }

    #[test]
    fn starting_at_honours_the_first_number() {
        let seq = InvoiceSequence::starting_at(100);
        assert_eq!(seq.next().get(), 100);
        assert_eq!(seq.next().get(), 101);

        let seq = InvoiceSequence::starting_at(0);
        assert_eq!(seq.next().get(), 1);
    }

    #[test]
    fn process_sequence_is_strictly_increasing() {
        let a = InvoiceSequence::process().next();
        let b = InvoiceSequence::process().next();
        assert!(a < b);
    }

    #[test]
    fn concurrent_callers_get_unique_numbers() {
        let seq = Arc::new(InvoiceSequence::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || (0..250).map(|_| seq.next().get()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let numbers = handle.join().unwrap();
            // Each thread observes its own numbers in increasing order.
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            for n in numbers {
                assert!(seen.insert(n), "duplicate number {n}");
            }
        }
        assert_eq!(seen.len(), 2000);
        assert_eq!(seq.last_issued().map(InvoiceNumber::get), Some(2000));
    }
}
