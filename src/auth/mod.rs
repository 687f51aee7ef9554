use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Sign out failed:{0}")]
    SignOutError(String),
}

/// Signed-in user as shown in the page header.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub full_name: String,
}

/// Seam for the external authentication collaborator. `None` from
/// `current_user` means the anonymous/guest view.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn current_user(&self) -> Option<UserProfile>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// No-auth fallback: everyone is a guest, sign out is a no-op.
pub struct GuestAuth;

#[async_trait]
impl AuthProvider for GuestAuth {
    async fn current_user(&self) -> Option<UserProfile> {
        None
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn guest_auth_is_anonymous() {
        let auth = GuestAuth;
        assert!(auth.current_user().await.is_none());
        assert!(auth.sign_out().await.is_ok());
    }
}
