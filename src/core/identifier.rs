//! Logistics identifier validation.
//!
//! Every bundle carries two external identifiers: an SSCC (Serial Shipping
//! Container Code) and a LUID (Logistics Unit Identifier). This module owns
//! the one rule everything else relies on: after trimming surrounding
//! whitespace, neither identifier may be empty. Uniqueness across the bundle
//! population is the store's job, not this module's.

/// A pair of external logistics identifiers for one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogisticsIds {
    /// Serial Shipping Container Code
    pub sscc: String,
    /// Logistics Unit Identifier
    pub luid: String,
}

impl LogisticsIds {
    /// Creates a new identifier pair. No validation happens here; callers
    /// run [`normalized`](Self::normalized) before persisting anything.
    #[must_use]
    pub const fn new(sscc: String, luid: String) -> Self {
        Self { sscc, luid }
    }

    /// Returns the pair with surrounding whitespace removed, or `None` if
    /// either identifier is empty after trimming.
    ///
    /// Interior whitespace is left alone; only the surrounding kind is
    /// stripped before the emptiness check.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let sscc = self.sscc.trim();
        let luid = self.luid.trim();

        if sscc.is_empty() || luid.is_empty() {
            return None;
        }

        Some(Self {
            sscc: sscc.to_string(),
            luid: luid.to_string(),
        })
    }
}
