//! Short code type and the pure half of code allocation.
//!
//! A short code is the path segment that identifies a link. Codes are
//! case-sensitive and made of ASCII letters, digits and hyphens. Generated
//! codes never contain hyphens; hyphens are only available to custom codes.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Alphabet used for generated codes (62 characters, no hyphen).
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated code.
pub const GENERATED_CODE_LEN: usize = 6;

/// Number of random candidates tried before allocation gives up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// A validated short code.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Return the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the code and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validate a caller-supplied custom code.
///
/// The code must be non-empty and consist only of ASCII letters, digits and
/// `-`. No trimming or case folding is applied.
///
/// # Errors
///
/// Returns `CoreError::InvalidCode` if the code is empty or contains any
/// other character.
pub fn validate_custom_code(code: &str) -> Result<ShortCode, CoreError> {
    ShortCode::try_from(code.to_string())
}

/// Generate a random code of [`GENERATED_CODE_LEN`] characters drawn
/// uniformly from [`CODE_ALPHABET`].
pub fn generate_code<R: Rng>(rng: &mut R) -> ShortCode {
    let code = std::iter::repeat_with(|| {
        char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())])
    })
    .take(GENERATED_CODE_LEN)
    .collect();
    ShortCode(code)
}

const fn is_code_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

impl FromStr for ShortCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_custom_code(s)
    }
}

impl fmt::Debug for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortCode({})", self.0)
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() || !value.bytes().all(is_code_byte) {
            return Err(CoreError::InvalidCode(value));
        }
        Ok(Self(value))
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
