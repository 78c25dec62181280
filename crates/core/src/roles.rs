//! Well-known roles and the permission rules derived from them.
//!
//! Role names are stored as lowercase text in the `users.role` column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_VIEWER: &str = "viewer";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";

/// A user's role on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => ROLE_VIEWER,
            Role::Moderator => ROLE_MODERATOR,
            Role::Admin => ROLE_ADMIN,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// Admins and moderators manage accounts and bulk imports.
    pub fn can_manage_users(self) -> bool {
        matches!(self, Role::Admin | Role::Moderator)
    }

    /// Whether an actor with this role may create, edit or delete an account
    /// holding `target`. Only admins touch admin accounts.
    pub fn can_manage_role(self, target: Role) -> bool {
        match target {
            Role::Admin => self.is_admin(),
            Role::Viewer | Role::Moderator => self.can_manage_users(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_VIEWER => Ok(Role::Viewer),
            ROLE_MODERATOR => Ok(Role::Moderator),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(format!("Unknown role '{other}'")),
        }
    }
}
