use crate::error::{EntityError, EntityErrorExt};
use crate::handle::{decode, encode};
use evhub_backend::SharedBackend;
use evhub_domain::User;
use evhub_domain::constants::USER;
use serde::Serialize;

/// Calls scoped to the signed-in user.
#[derive(Debug, Clone)]
pub struct Auth {
    backend: SharedBackend,
}

impl Auth {
    pub(crate) const fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    pub async fn me(&self) -> Result<User, EntityError> {
        decode(self.backend.me().await.context("fetching current user")?)
    }

    /// Applies `patch` to the signed-in user's record and returns the stored user.
    pub async fn update_my_user_data(
        &self,
        patch: &(impl Serialize + Sync),
    ) -> Result<User, EntityError> {
        let body = encode(patch, USER)?;
        decode(self.backend.update_me(body).await.context("updating current user")?)
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), EntityError> {
        self.backend
            .change_password(current_password, new_password)
            .await
            .context("changing password")?;
        Ok(())
    }
}
