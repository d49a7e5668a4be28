//! Authenticated user identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ContactNumber, Role};

/// Validation errors returned while building a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier was blank.
    EmptyId,
    /// Identifier was not a UUID.
    InvalidId,
    /// Name was blank.
    EmptyName,
    /// Email did not look like `local@domain`.
    InvalidEmail,
    /// Phone was blank.
    EmptyPhone,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
            Self::EmptyPhone => write!(f, "phone must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier, validated as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user, created only after a successful code verification.
///
/// ## Invariants
/// - `id` is a valid UUID string.
/// - `name` is non-empty once trimmed.
/// - `email` has a non-empty local part and domain around a single `@`.
/// - `role` is fixed for the life of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(example = "John Smith")]
    name: String,
    #[schema(example = "john.smith@example.com")]
    email: String,
    #[schema(value_type = String, example = "5551234567")]
    phone: ContactNumber,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

/// Unvalidated user fields, grouped to keep constructors readable.
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Identifier as text.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Verified phone number.
    pub phone: String,
    /// Role chosen before login.
    pub role: Role,
    /// Optional avatar URL.
    pub avatar: Option<String>,
}

impl User {
    /// Fallible constructor enforcing the record invariants.
    ///
    /// # Examples
    /// ```
    /// use homestead::domain::{Role, User, UserDraft};
    ///
    /// let user = User::try_from_draft(UserDraft {
    ///     id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".into(),
    ///     name: "Sarah Johnson".into(),
    ///     email: "sarah@example.com".into(),
    ///     phone: "5551234567".into(),
    ///     role: Role::Agent,
    ///     avatar: None,
    /// })
    /// .unwrap();
    /// assert_eq!(user.role(), Role::Agent);
    /// ```
    pub fn try_from_draft(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            name,
            email,
            phone,
            role,
            avatar,
        } = draft;
        let id = UserId::new(id)?;
        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if !is_plausible_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        let phone = ContactNumber::new(phone).map_err(|_| UserValidationError::EmptyPhone)?;
        let avatar = avatar.filter(|url| !url.trim().is_empty());
        Ok(Self {
            id,
            name,
            email,
            phone,
            role,
            avatar,
        })
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number the one-time code was verified against.
    pub fn phone(&self) -> &ContactNumber {
        &self.phone
    }

    /// Role fixed at verification time.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Avatar URL, when the profile has one.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    phone: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            phone,
            role,
            avatar,
        } = value;
        Self {
            id: id.into(),
            name,
            email,
            phone: phone.into(),
            role,
            avatar,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            name,
            email,
            phone,
            role,
            avatar,
        } = value;
        User::try_from_draft(UserDraft {
            id,
            name,
            email,
            phone,
            role,
            avatar,
        })
    }
}

#[cfg(test)]
mod tests;
