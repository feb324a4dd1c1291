//! RFC 6238 code generation.
//!
//! Pure function of an entry and a unix timestamp. The session calls
//! [`generate`] on every detail render with the current time.

use data_encoding::BASE32_NOPAD;
use totp_lite::{Sha1, Sha256, Sha512, totp_custom};

use crate::types::{Entry, TotpAlgorithm};

/// A generated code and the moment it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpCode {
    pub code: String,
    /// Unix seconds at which the next window starts.
    pub expires_at: u64,
}

impl TotpCode {
    /// Whole seconds left in the current window.
    pub fn remaining(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }
}

/// Errors returned while generating a code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TotpError {
    #[error("secret is not valid base32")]
    InvalidSecret,
    #[error("digits must be between 6 and 8")]
    UnsupportedDigits,
    #[error("period must be greater than zero")]
    InvalidPeriod,
}

/// Generate the code valid for `entry` at `unix_secs`.
pub fn generate(entry: &Entry, unix_secs: u64) -> Result<TotpCode, TotpError> {
    if !(6..=8).contains(&entry.digits) {
        return Err(TotpError::UnsupportedDigits);
    }
    if entry.period == 0 {
        return Err(TotpError::InvalidPeriod);
    }

    let key = decode_secret(&entry.secret).ok_or(TotpError::InvalidSecret)?;
    let period = u64::from(entry.period);
    let digits = u32::from(entry.digits);
    let code = match entry.algorithm {
        TotpAlgorithm::Sha1 => totp_custom::<Sha1>(period, digits, &key, unix_secs),
        TotpAlgorithm::Sha256 => totp_custom::<Sha256>(period, digits, &key, unix_secs),
        TotpAlgorithm::Sha512 => totp_custom::<Sha512>(period, digits, &key, unix_secs),
    };

    Ok(TotpCode {
        code,
        expires_at: (unix_secs / period + 1) * period,
    })
}

/// Decode a base32 secret, tolerating whitespace, lowercase and padding.
fn decode_secret(secret: &str) -> Option<Vec<u8>> {
    let normalized: String = secret
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace() && *ch != '=')
        .map(|ch| ch.to_ascii_uppercase())
        .collect();
    if normalized.is_empty() {
        return None;
    }
    BASE32_NOPAD.decode(normalized.as_bytes()).ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 Appendix B seeds, base32-encoded.
    const SEED_SHA1: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
    const SEED_SHA256: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZA";
    const SEED_SHA512: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQGEZDGNA";

    fn entry(secret: &str, algorithm: TotpAlgorithm, digits: u8) -> Entry {
        let mut entry = Entry::new("RFC", "", secret);
        entry.algorithm = algorithm;
        entry.digits = digits;
        entry
    }

    #[test]
    fn rfc_vectors_sha1() {
        let e = entry(SEED_SHA1, TotpAlgorithm::Sha1, 8);
        assert_eq!(generate(&e, 59).unwrap().code, "94287082");
        assert_eq!(generate(&e, 1_111_111_109).unwrap().code, "07081804");
        assert_eq!(generate(&e, 20_000_000_000).unwrap().code, "65353130");
    }

    #[test]
    fn rfc_vectors_sha256() {
        let e = entry(SEED_SHA256, TotpAlgorithm::Sha256, 8);
        assert_eq!(generate(&e, 59).unwrap().code, "46119246");
    }

    #[test]
    fn rfc_vectors_sha512() {
        let e = entry(SEED_SHA512, TotpAlgorithm::Sha512, 8);
        assert_eq!(generate(&e, 59).unwrap().code, "90693936");
    }

    #[test]
    fn six_digit_code_is_suffix_of_eight_digit_code() {
        let e = entry(SEED_SHA1, TotpAlgorithm::Sha1, 6);
        assert_eq!(generate(&e, 59).unwrap().code, "287082");
    }

    #[test]
    fn expiry_is_end_of_window() {
        let e = entry(SEED_SHA1, TotpAlgorithm::Sha1, 6);
        assert_eq!(generate(&e, 59).unwrap().expires_at, 60);
        assert_eq!(generate(&e, 60).unwrap().expires_at, 90);
        assert_eq!(generate(&e, 0).unwrap().expires_at, 30);
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let code = TotpCode {
            code: "123456".into(),
            expires_at: 60,
        };
        assert_eq!(code.remaining(31), 29);
        assert_eq!(code.remaining(60), 0);
        assert_eq!(code.remaining(75), 0);
    }

    #[test]
    fn secret_normalization() {
        let clean = entry(SEED_SHA1, TotpAlgorithm::Sha1, 6);
        let messy = entry("gezd gnbv gy3t qojq gezd gnbv gy3t qojq====", TotpAlgorithm::Sha1, 6);
        assert_eq!(generate(&clean, 1234).unwrap(), generate(&messy, 1234).unwrap());
    }

    #[test]
    fn rejects_invalid_secret() {
        let e = entry("not*base32!", TotpAlgorithm::Sha1, 6);
        assert_eq!(generate(&e, 0), Err(TotpError::InvalidSecret));
    }

    #[test]
    fn rejects_empty_secret() {
        let e = entry("   ", TotpAlgorithm::Sha1, 6);
        assert_eq!(generate(&e, 0), Err(TotpError::InvalidSecret));
    }

    #[test]
    fn rejects_bad_parameters() {
        let e = entry(SEED_SHA1, TotpAlgorithm::Sha1, 9);
        assert_eq!(generate(&e, 0), Err(TotpError::UnsupportedDigits));

        let mut e = entry(SEED_SHA1, TotpAlgorithm::Sha1, 6);
        e.period = 0;
        assert_eq!(generate(&e, 0), Err(TotpError::InvalidPeriod));
    }
}
