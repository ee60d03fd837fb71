//! User entity, creation payload, and patch payload.

use super::super::value_objects::UserRole;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A dashboard user.
///
/// `id` and `created_at` are assigned by the data client on creation and
/// never change afterwards; [`User::apply_patch`] cannot touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address. Not enforced unique.
    pub email: String,

    /// User's role.
    pub role: UserRole,

    /// Whether the account is active.
    pub is_active: bool,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last login timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,

    /// Avatar reference (usually a URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Materializes a creation payload into a user, stamping a fresh
    /// identifier and the current time as the creation timestamp.
    #[must_use]
    pub fn from_new(new_user: NewUser) -> Self {
        Self::from_new_with(new_user, UserId::generate(), Utc::now())
    }

    /// Materializes a creation payload with an explicit id and timestamp.
    #[must_use]
    pub fn from_new_with(new_user: NewUser, id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at,
            last_login: new_user.last_login,
            avatar: new_user.avatar,
        }
    }

    /// Merges a patch into this user. Fields absent from the patch keep
    /// their current value.
    pub fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(last_login) = patch.last_login {
            self.last_login = Some(last_login);
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar = Some(avatar.clone());
        }
    }

    /// Returns a copy of this user with the patch merged in.
    #[must_use]
    pub fn patched(&self, patch: &UserPatch) -> Self {
        let mut user = self.clone();
        user.apply_patch(patch);
        user
    }
}

/// Payload for creating a user: every required field except the
/// server-assigned `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub role: UserRole,

    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,

    #[validate(url(message = "Invalid avatar URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl NewUser {
    /// Creates a payload with the mandatory fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole, is_active: bool) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            is_active,
            last_login: None,
            avatar: None,
        }
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Partial update for a user. Only the named fields are overridden.
///
/// Identity fields (`id`, `createdAt`) have no counterpart here, so a patch
/// can never change them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,

    #[validate(url(message = "Invalid avatar URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the role.
    #[must_use]
    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets the last login timestamp.
    #[must_use]
    pub fn last_login(mut self, at: DateTime<Utc>) -> Self {
        self.last_login = Some(at);
        self
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Returns true if the patch names no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
            && self.last_login.is_none()
            && self.avatar.is_none()
    }
}
