//! Domain types for totp-view.
//!
//! An [`Entry`] is loaded once from the entry store and never mutated
//! afterwards, apart from its display string ([`Entry::choice`]) which
//! the session computes exactly once at startup.

use serde::{Deserialize, Serialize};

/// Separator used by exporters that pack "Issuer - Account" into one label.
pub const LABEL_SEPARATOR: &str = " - ";

/// Default code length when the entry file does not specify one.
pub const DEFAULT_DIGITS: u8 = 6;

/// Default validity window in seconds.
pub const DEFAULT_PERIOD: u32 = 30;

// ============================================================================
// ENUMS
// ============================================================================

/// HMAC hash function used to derive codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TotpAlgorithm {
    #[default]
    #[serde(rename = "SHA1", alias = "sha1", alias = "Sha1")]
    Sha1,
    #[serde(rename = "SHA256", alias = "sha256", alias = "Sha256")]
    Sha256,
    #[serde(rename = "SHA512", alias = "sha512", alias = "Sha512")]
    Sha512,
}

// ============================================================================
// ENTRY
// ============================================================================

/// One authentication account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display label, possibly "Issuer - Account".
    pub label: String,

    /// Explicit issuer. Empty means "derive from label".
    #[serde(default)]
    pub issuer: String,

    /// Base32 shared secret.
    pub secret: String,

    #[serde(default)]
    pub algorithm: TotpAlgorithm,

    #[serde(default = "default_digits")]
    pub digits: u8,

    #[serde(default = "default_period")]
    pub period: u32,

    /// Derived display string. Never read from disk.
    #[serde(skip)]
    pub choice: String,
}

fn default_digits() -> u8 {
    DEFAULT_DIGITS
}

fn default_period() -> u32 {
    DEFAULT_PERIOD
}

impl Entry {
    /// Build an entry with default TOTP parameters.
    pub fn new(
        label: impl Into<String>,
        issuer: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Entry {
            label: label.into(),
            issuer: issuer.into(),
            secret: secret.into(),
            algorithm: TotpAlgorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            choice: String::new(),
        }
    }

    /// Compute the human-readable display string.
    ///
    /// `"issuer (account)"` when the label carries an account segment,
    /// otherwise the issuer alone. The account is the second
    /// separator-delimited segment; anything after a further separator
    /// is dropped.
    pub fn derive_choice(&self) -> String {
        let mut segments = self.label.split(LABEL_SEPARATOR);
        let head = segments.next().unwrap_or_default();
        let account = segments.next().map(str::trim).unwrap_or_default();

        let issuer = match self.issuer.trim() {
            "" => head.trim(),
            explicit => explicit,
        };

        if account.is_empty() {
            issuer.to_string()
        } else {
            format!("{} ({})", issuer, account)
        }
    }

    /// Case-insensitive substring match against the display string.
    ///
    /// `query` must already be lowercased.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.choice.to_lowercase().contains(query)
    }
}

// ============================================================================
// TESTS
// ============================================================================
