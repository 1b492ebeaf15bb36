//! Advisory passphrase strength policy.
//!
//! Mirrors the signup form's rules. The crypto layer never enforces them:
//! key derivation accepts any passphrase, and callers decide whether to
//! block weak ones.

/// Minimum passphrase length accepted by the signup policy.
pub const MIN_PASSPHRASE_LEN: usize = 12;

const SPECIAL_CHARS: &str = "!@#$%^&*";

/// Per-rule outcome of checking a passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    /// At least [`MIN_PASSPHRASE_LEN`] characters.
    pub length: bool,
    /// Contains an uppercase letter.
    pub uppercase: bool,
    /// Contains a lowercase letter.
    pub lowercase: bool,
    /// Contains a digit.
    pub digit: bool,
    /// Contains one of `!@#$%^&*`.
    pub special: bool,
}

impl PasswordCheck {
    /// True when every rule passes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.digit && self.special
    }
}

/// Checks a passphrase against the advisory strength rules.
pub fn validate_password(password: &str) -> PasswordCheck {
    PasswordCheck {
        length: password.chars().count() >= MIN_PASSPHRASE_LEN,
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        digit: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    }
}
