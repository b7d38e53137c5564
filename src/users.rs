//! Users

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{
    listing::{Predicate, contains_ignore_case},
    roles::Role,
};

/// Backend primary key of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// User account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: UserId,

    /// Login name
    pub username: String,

    /// Contact e-mail
    #[serde(default)]
    pub email: String,

    /// Full name
    #[serde(rename = "nombre_completo", default)]
    pub full_name: Option<String>,

    /// Phone number
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    /// Postal address
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,

    /// Role
    #[serde(rename = "rol", default)]
    pub role: Role,
}

impl User {
    /// Full name when known, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Create or update body for the users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    /// Login name
    pub username: String,

    /// Contact e-mail
    pub email: String,

    /// New password; omitted on updates that keep the current one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Full name
    #[serde(rename = "nombre_completo")]
    pub full_name: String,

    /// Phone number
    #[serde(rename = "telefono")]
    pub phone: String,

    /// Postal address
    #[serde(rename = "direccion")]
    pub address: String,

    /// Role
    #[serde(rename = "rol")]
    pub role: Role,
}

/// Self-service profile edit sent by a signed-in user. Role and password are not editable here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileInput {
    /// Contact e-mail
    pub email: String,

    /// Full name
    #[serde(rename = "nombre_completo")]
    pub full_name: String,

    /// Phone number
    #[serde(rename = "telefono")]
    pub phone: String,

    /// Postal address
    #[serde(rename = "direccion")]
    pub address: String,
}

impl From<&User> for ProfileInput {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            full_name: user.full_name.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
        }
    }
}

/// Checks whether `username` is already used by one of `users`.
pub fn username_taken(users: &[User], username: &str) -> bool {
    users.iter().any(|user| user.username == username)
}

/// Filters for user listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive search over username, e-mail and full name
    pub search: String,

    /// Only users with this role
    pub role: Option<Role>,
}

impl UserFilter {
    /// Number of filters that narrow the listing.
    pub fn active_count(&self) -> usize {
        usize::from(!self.search.trim().is_empty()) + usize::from(self.role.is_some())
    }
}

impl Predicate<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        let search = self.search.trim();

        let found = contains_ignore_case(&user.username, search)
            || contains_ignore_case(&user.email, search)
            || user
                .full_name
                .as_deref()
                .is_some_and(|name| contains_ignore_case(name, search));

        found && self.role.is_none_or(|role| user.role == role)
    }
}

/// Role record managed from the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Primary key
    pub id: u64,

    /// Role name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Description
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Whether the role can be assigned
    #[serde(rename = "activo", default)]
    pub active: bool,
}

/// Create or update body for the roles endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInput {
    /// Role name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Description
    #[serde(rename = "descripcion")]
    pub description: String,

    /// Whether the role can be assigned
    #[serde(rename = "activo")]
    pub active: bool,
}

/// Name search over role records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleFilter {
    /// Case-insensitive name search
    pub search: String,
}

impl Predicate<RoleRecord> for RoleFilter {
    fn matches(&self, role: &RoleRecord) -> bool {
        contains_ignore_case(&role.name, self.search.trim())
    }
}
