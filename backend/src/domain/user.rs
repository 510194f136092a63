//! User data model and the identity view handed to authentication.
//!
//! Users are read-only from this crate: they are created elsewhere and only
//! resolved here, either as the caller of a scoring operation or as the
//! subject of a credential check.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier was zero or negative.
    NonPositiveId,
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Role authority label was blank.
    EmptyAuthority,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "user id must be positive"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyAuthority => write!(f, "role authority must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Smallest valid identifier.
    pub const MIN: Self = Self(1);
    /// Largest valid identifier.
    pub const MAX: Self = Self(i64::MAX);

    /// Validate and construct a [`UserId`].
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Login identity of a user, trimmed and non-empty.
///
/// # Examples
/// ```
/// use movie_ratings::domain::Username;
///
/// let name = Username::new("  maria@gmail.com ").unwrap();
/// assert_eq!(name.as_ref(), "maria@gmail.com");
/// assert!(Username::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authority granted to a user, such as `ROLE_ADMIN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    id: i64,
    authority: String,
}

impl Role {
    /// Validate and construct a role.
    pub fn new(id: i64, authority: impl Into<String>) -> Result<Self, UserValidationError> {
        let authority = authority.into();
        if authority.trim().is_empty() {
            return Err(UserValidationError::EmptyAuthority);
        }
        Ok(Self { id, authority })
    }

    /// Store identifier of the role.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Authority label.
    pub fn authority(&self) -> &str {
        self.authority.as_str()
    }
}

/// Application user with the roles granted to them.
///
/// ## Invariants
/// - `roles` holds no two roles with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
    roles: Vec<Role>,
}

impl User {
    /// Build a user, discarding duplicate roles.
    pub fn new(id: UserId, username: Username, roles: impl IntoIterator<Item = Role>) -> Self {
        let mut unique: Vec<Role> = Vec::new();
        for role in roles {
            if !unique.iter().any(|held| held.id == role.id) {
                unique.push(role);
            }
        }
        Self {
            id,
            username,
            roles: unique,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login identity.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Roles granted to the user.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Whether the user holds the role named `authority`.
    ///
    /// # Examples
    /// ```
    /// use movie_ratings::domain::{Role, User, UserId, Username};
    ///
    /// let user = User::new(
    ///     UserId::new(1).unwrap(),
    ///     Username::new("alex@gmail.com").unwrap(),
    ///     [Role::new(2, "ROLE_ADMIN").unwrap()],
    /// );
    /// assert!(user.has_role("ROLE_ADMIN"));
    /// assert!(!user.has_role("ROLE_CLIENT"));
    /// ```
    pub fn has_role(&self, authority: &str) -> bool {
        self.roles.iter().any(|role| role.authority == authority)
    }
}

/// One row of the user/role join returned by the store.
///
/// A user with several roles yields several rows that share `username` and
/// `password`.
#[derive(Clone, PartialEq, Eq)]
pub struct UserDetailsProjection {
    /// Login identity.
    pub username: String,
    /// Stored password hash.
    pub password: String,
    /// Identifier of the role on this row.
    pub role_id: i64,
    /// Authority label of the role on this row.
    pub authority: String,
}

impl fmt::Debug for UserDetailsProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDetailsProjection")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role_id", &self.role_id)
            .field("authority", &self.authority)
            .finish()
    }
}

/// Stored password hash, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(Zeroizing<String>);

impl PasswordHash {
    /// Wrap a stored hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(Zeroizing::new(hash.into()))
    }

    /// Hash text for the credential verifier.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Username, password hash, and full role set in the shape the
/// authentication subsystem expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    username: Username,
    password: PasswordHash,
    roles: Vec<Role>,
}

impl UserIdentity {
    /// Login identity.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    /// Every role granted to the user, in row order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Authority labels of every granted role.
    pub fn authorities(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(Role::authority)
    }
}

/// Reduce the ordered projection rows of one user into a single identity.
///
/// Username and password come from the first row; each row contributes its
/// role once. Returns `Ok(None)` for an empty row set.
///
/// # Examples
/// ```
/// use movie_ratings::domain::{fold_identity, UserDetailsProjection};
///
/// let row = |role_id: i64, authority: &str| UserDetailsProjection {
///     username: "alex@gmail.com".into(),
///     password: "$2a$10$hash".into(),
///     role_id,
///     authority: authority.into(),
/// };
/// let identity = fold_identity(vec![row(1, "ROLE_CLIENT"), row(2, "ROLE_ADMIN")])
///     .unwrap()
///     .unwrap();
/// assert_eq!(identity.roles().len(), 2);
/// ```
pub fn fold_identity(
    rows: Vec<UserDetailsProjection>,
) -> Result<Option<UserIdentity>, UserValidationError> {
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(None);
    };

    let UserDetailsProjection {
        username,
        password,
        role_id,
        authority,
    } = first;
    let mut roles = vec![Role::new(role_id, authority)?];
    for row in rows {
        if roles.iter().any(|role| role.id == row.role_id) {
            continue;
        }
        roles.push(Role::new(row.role_id, row.authority)?);
    }

    Ok(Some(UserIdentity {
        username: Username::new(username)?,
        password: PasswordHash::new(password),
        roles,
    }))
}
