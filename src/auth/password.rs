//! Password hashing and the password strength rule shown on the sign-up form.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};

use crate::Error;

/// The minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Which of the strength criteria a password meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub length: bool,
    pub upper_case: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl PasswordStrength {
    /// The score needed for the sign-up form to accept a password.
    pub const REQUIRED_SCORE: usize = 3;

    pub fn new(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            upper_case: password.chars().any(|c| c.is_ascii_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            symbol: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    /// The number of criteria met, out of four.
    pub fn score(&self) -> usize {
        [self.length, self.upper_case, self.digit, self.symbol]
            .into_iter()
            .filter(|met| *met)
            .count()
    }

    /// Long enough and meets at least [Self::REQUIRED_SCORE] criteria.
    pub fn is_acceptable(&self) -> bool {
        self.length && self.score() >= Self::REQUIRED_SCORE
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `raw_password` with the given `cost`.
    ///
    /// The password is not checked for strength, callers validate it first.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the password could not be hashed.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        hash(raw_password, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Create a new `PasswordHash` from an existing hash string without any validation.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod password_strength_tests {
    use super::PasswordStrength;

    #[test]
    fn scores_each_criterion() {
        assert_eq!(PasswordStrength::new("").score(), 0);
        assert_eq!(PasswordStrength::new("abcdefgh").score(), 1);
        assert_eq!(PasswordStrength::new("Abcdefgh").score(), 2);
        assert_eq!(PasswordStrength::new("Abcdefg1").score(), 3);
        assert_eq!(PasswordStrength::new("Abcdef1!").score(), 4);
    }

    #[test]
    fn short_password_is_never_acceptable() {
        let strength = PasswordStrength::new("Ab1!");

        assert_eq!(strength.score(), 3);
        assert!(!strength.is_acceptable());
    }

    #[test]
    fn long_password_needs_two_more_criteria() {
        assert!(!PasswordStrength::new("abcdefgh1").is_acceptable());
        assert!(PasswordStrength::new("abcdefgh1!").is_acceptable());
    }
}
