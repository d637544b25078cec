//! Explicit session state.
//!
//! The signed-in user lives in a value the embedder owns and passes to the
//! services. It is filled on sign-in and cleared on sign-out.

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: String,
    pub home_currency: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Option<SessionUser>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that is already signed in.
    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn sign_in(&mut self, user: SessionUser) {
        info!("User {} signed in", user.user_id);
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!("User {} signed out", user.user_id);
        }
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The user id every scoped operation runs under.
    pub fn require_user(&self) -> Result<&str> {
        self.user
            .as_ref()
            .map(|u| u.user_id.as_str())
            .ok_or(Error::NoSession)
    }
}
