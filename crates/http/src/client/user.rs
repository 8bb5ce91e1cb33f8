//! Login and user center methods

use super::{ClientError, ConsoleClient};
use crate::types::{
    LoginRequest, LoginResponse, MessageResponse, PasswordChangeRequest, UserInfo, UserInfoUpdate,
};
use console_core::SessionCredential;
use tracing::debug;

/// Shortest password the backend accepts
pub const MIN_PASSWORD_LEN: usize = 6;

impl ConsoleClient {
    /// Exchange credentials for a session token and store it
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionCredential, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/login", &request).await?;

        let credential = SessionCredential::new(response.token);
        self.session()
            .sign_in(&credential)
            .map_err(|e| self.fail(e.into()))?;
        debug!("Signed in as {username}");
        Ok(credential)
    }

    /// Forget the stored credential
    ///
    /// The backend keeps no server-side session, so nothing is sent.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().sign_out()?;
        Ok(())
    }

    /// Profile of the signed-in user
    pub async fn user_info(&self) -> Result<UserInfo, ClientError> {
        self.get("/user/info").await
    }

    /// Change the signed-in user's password
    pub async fn update_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ClientError> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(self.fail(ClientError::InvalidInput(format!(
                "New password must be at least {MIN_PASSWORD_LEN} characters"
            ))));
        }

        let request = PasswordChangeRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.put("/user/password", &request).await
    }

    /// Rename the signed-in user
    pub async fn update_user_info(&self, username: &str) -> Result<MessageResponse, ClientError> {
        if username.trim().is_empty() {
            return Err(self.fail(ClientError::InvalidInput(
                "Username must not be empty".to_string(),
            )));
        }

        let request = UserInfoUpdate {
            username: username.to_string(),
        };
        self.put("/user/info", &request).await
    }
}
