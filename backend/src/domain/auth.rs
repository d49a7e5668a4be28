//! Authentication primitives: contact identifiers, one-time codes and the
//! code acceptance policy.
//!
//! Inbound payload parsing stays outside the domain; handlers call the
//! constructors here before talking to the session service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Literal code accepted by every acceptance policy in demo deployments.
pub const DEMO_BYPASS_CODE: &str = "123456";

/// Number of characters in a one-time code.
pub const OTP_LENGTH: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Contact was missing or blank once trimmed.
    EmptyContact,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContact => write!(f, "contact must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Phone number (or other contact handle) a one-time code is sent to.
///
/// ## Invariants
/// - Trimmed and non-empty. No further format checks are applied here; form
///   validation belongs to the screens.
///
/// # Examples
/// ```
/// use homestead::domain::ContactNumber;
///
/// let contact = ContactNumber::new(" 5551234567 ").unwrap();
/// assert_eq!(contact.as_ref(), "5551234567");
/// assert_eq!(contact.masked(), "******4567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Validate and construct a contact from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LoginValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LoginValidationError::EmptyContact);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Log-safe rendering that keeps only the last four characters.
    #[must_use]
    pub fn masked(&self) -> String {
        let total = self.0.chars().count();
        let hidden = total.saturating_sub(4);
        self.0
            .chars()
            .enumerate()
            .map(|(index, ch)| if index < hidden { '*' } else { ch })
            .collect()
    }
}

impl AsRef<str> for ContactNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ContactNumber> for String {
    fn from(value: ContactNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for ContactNumber {
    type Error = LoginValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One-time code exactly as the user typed it.
///
/// The code is deliberately not shape-checked: the acceptance policy decides
/// what counts as valid, including rejecting wrong lengths.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(Zeroizing<String>);

impl OtpCode {
    /// Wrap a submitted code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(Zeroizing::new(code.into()))
    }

    /// Raw code text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OtpCode").field(&"<redacted>").finish()
    }
}

/// Rule deciding which submitted codes verify.
///
/// No real code is ever delivered, so both policies are stand-ins for a
/// provider-side check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OtpAcceptance {
    /// Accept [`DEMO_BYPASS_CODE`] or any code of exactly [`OTP_LENGTH`]
    /// characters. Demo convenience; never enable against a real provider.
    #[default]
    DemoAnySixCharacters,
    /// Accept only [`DEMO_BYPASS_CODE`].
    BypassCodeOnly,
}

impl OtpAcceptance {
    /// Pick the policy; `true` selects the demo any-six rule.
    #[must_use]
    pub const fn from_flag(accept_any_six: bool) -> Self {
        if accept_any_six {
            Self::DemoAnySixCharacters
        } else {
            Self::BypassCodeOnly
        }
    }

    /// Whether `code` verifies under this policy.
    ///
    /// # Examples
    /// ```
    /// use homestead::domain::{OtpAcceptance, OtpCode};
    ///
    /// let policy = OtpAcceptance::DemoAnySixCharacters;
    /// assert!(policy.accepts(&OtpCode::new("000000")));
    /// assert!(!policy.accepts(&OtpCode::new("12")));
    /// ```
    #[must_use]
    pub fn accepts(self, code: &OtpCode) -> bool {
        if code.as_str() == DEMO_BYPASS_CODE {
            return true;
        }
        match self {
            Self::DemoAnySixCharacters => code.char_len() == OTP_LENGTH,
            Self::BypassCodeOnly => false,
        }
    }
}
