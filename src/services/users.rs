//! User administration service

use serde::Deserialize;
use validator::Validate;

use super::{generate_id, state::FleetState};
use crate::{
    error::{AppError, AppResult},
    models::{
        user::DEFAULT_AVATAR, CreateUser, UpdateUser, User, UserRole, UserStatus,
    },
};

/// User list tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum UserTab {
    #[default]
    All,
    Admins,
    Inactive,
}

#[derive(Clone, Default)]
pub struct UsersService;

impl UsersService {
    pub fn new() -> Self {
        Self
    }

    /// Onboard a new team member
    pub fn add_member(&self, state: &mut FleetState, mut data: CreateUser) -> AppResult<User> {
        data.email = data.email.trim().to_lowercase();
        data.validate()?;
        let email = data.email;
        if state.users().iter().any(|u| u.email.to_lowercase() == email) {
            return Err(AppError::Validation(format!(
                "A member with email {} already exists",
                email
            )));
        }

        let user = User {
            id: generate_id("USR", 5, |id| state.find_user(id).is_some()),
            name: data.name,
            email,
            role: data.role.unwrap_or(UserRole::Staff),
            status: UserStatus::Active,
            last_login: "Never".to_string(),
            ip: String::new(),
            avatar: data.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        };

        state.add_user(user.clone())?;
        tracing::info!(id = %user.id, role = %user.role, "Member added");
        Ok(user)
    }

    /// Flip a member between Active and Inactive
    pub fn toggle_status(&self, state: &mut FleetState, id: &str) -> AppResult<UserStatus> {
        let next = state
            .find_user(id)
            .map(|u| u.status.toggled())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
        state.update_user(
            id,
            UpdateUser {
                status: Some(next),
                ..Default::default()
            },
        )?;
        Ok(next)
    }

    /// Revoke a member's access
    pub fn remove(&self, state: &mut FleetState, id: &str) -> AppResult<()> {
        if !state.delete_user(id) {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        tracing::info!(id, "Member removed");
        Ok(())
    }

    /// Search by name, email or role within a tab
    pub fn search<'a>(&self, state: &'a FleetState, term: &str, tab: UserTab) -> Vec<&'a User> {
        let term = term.to_lowercase();
        state
            .users()
            .iter()
            .filter(|user| {
                user.name.to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
                    || user.role.as_str().to_lowercase().contains(&term)
            })
            .filter(|user| match tab {
                UserTab::All => true,
                UserTab::Admins => user.role == UserRole::Admin,
                UserTab::Inactive => user.status == UserStatus::Inactive,
            })
            .collect()
    }
}
