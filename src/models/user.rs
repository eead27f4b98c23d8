//! Console user account model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{UserRole, UserStatus};

pub const DEFAULT_AVATAR: &str = "https://www.gravatar.com/avatar/?d=mp";

/// User account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[validate(length(min = 1, message = "User id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    /// Display string, not a timestamp
    pub last_login: String,
    pub ip: String,
    pub avatar: String,
}

/// Add member request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub role: Option<UserRole>,
    pub avatar: Option<String>,
}

/// Partial user update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub last_login: Option<String>,
    pub ip: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(last_login) = update.last_login {
            self.last_login = last_login;
        }
        if let Some(ip) = update.ip {
            self.ip = ip;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
    }
}
