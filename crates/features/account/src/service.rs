use crate::error::{AccountError, AccountErrorExt};
use crate::forms::{PasswordChange, ProfileUpdate};
use evhub_domain::User;
use evhub_entities::Entities;
use tracing::{info, instrument};

/// Account settings of the signed-in user. Forms are validated locally first; a rejected form
/// never reaches the backend.
#[derive(Debug, Clone)]
pub struct AccountService {
    entities: Entities,
}

impl AccountService {
    #[must_use]
    pub const fn new(entities: Entities) -> Self {
        Self { entities }
    }

    pub async fn profile(&self) -> Result<User, AccountError> {
        self.entities.auth().me().await.context("loading profile")
    }

    #[instrument(skip_all)]
    pub async fn update_profile(&self, form: &ProfileUpdate) -> Result<User, AccountError> {
        let update = form.validate()?;
        let user =
            self.entities.auth().update_my_user_data(&update).await.context("saving profile")?;
        info!(user = ?user.id, "Profile updated");
        Ok(user)
    }

    #[instrument(skip_all)]
    pub async fn change_password(&self, form: &PasswordChange) -> Result<(), AccountError> {
        form.validate()?;
        self.entities
            .auth()
            .change_password(&form.current_password, &form.new_password)
            .await
            .context("changing password")?;
        info!("Password changed");
        Ok(())
    }
}
