//! Masking of secret values for diagnostics.
//!
//! A secret is never emitted in full. At most its trailing
//! [`VISIBLE_SUFFIX_LEN`] characters are revealed, and only when the secret is
//! long enough that the suffix gives away a small fraction of it.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Number of trailing characters a mask may reveal.
pub const VISIBLE_SUFFIX_LEN: usize = 4;

/// Secrets with fewer characters than this are hidden entirely.
pub const MIN_REVEALABLE_LEN: usize = 8;

/// A display-safe view of a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskedSecret {
    /// Only the trailing characters are shown.
    Suffix(String),
    /// Nothing about the secret is shown.
    Hidden,
}

impl MaskedSecret {
    /// The revealed suffix, if any.
    pub fn suffix(&self) -> Option<&str> {
        match self {
            Self::Suffix(s) => Some(s),
            Self::Hidden => None,
        }
    }
}

impl fmt::Display for MaskedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suffix(s) => write!(f, "...{}", s),
            Self::Hidden => write!(f, "[REDACTED]"),
        }
    }
}

/// Mask a secret, revealing at most its last four characters.
///
/// Characters are counted as Unicode scalar values, so multi-byte secrets are
/// never split mid-character.
pub fn mask_secret(secret: &SecretString) -> MaskedSecret {
    let exposed = secret.expose_secret();
    let len = exposed.chars().count();
    if len < MIN_REVEALABLE_LEN {
        return MaskedSecret::Hidden;
    }

    let suffix: String = exposed.chars().skip(len - VISIBLE_SUFFIX_LEN).collect();
    MaskedSecret::Suffix(suffix)
}
