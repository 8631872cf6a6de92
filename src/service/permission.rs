use crate::{
    data::admin::AdminRepository,
    error::{auth::AuthError, AppError},
    state::BotState,
};

/// Gate for admin-only commands, backed by the admin allow-list.
pub struct PermissionService<'a> {
    state: &'a BotState,
}

impl<'a> PermissionService<'a> {
    pub fn new(state: &'a BotState) -> Self {
        Self { state }
    }

    fn repo(&self) -> AdminRepository<'a> {
        AdminRepository::new(&self.state.admins)
    }

    pub async fn is_admin(&self, actor_id: u64) -> Result<bool, AppError> {
        self.repo().is_admin(actor_id).await
    }

    /// Rejects actors that are neither a bot owner nor a listed admin.
    pub async fn require_admin(&self, actor_id: u64) -> Result<(), AppError> {
        if !self.is_admin(actor_id).await? {
            return Err(AuthError::NotBotAdmin { actor_id }.into());
        }
        Ok(())
    }

    /// Adds `user_id` to the admin list. Returns false if they were already listed.
    pub async fn add_admin(&self, actor_id: u64, user_id: u64) -> Result<bool, AppError> {
        self.require_admin(actor_id).await?;

        let added = self.repo().add_admin(user_id).await?;
        if added {
            tracing::info!("{} granted bot admin to {}", actor_id, user_id);
        }

        Ok(added)
    }

    /// Removes `user_id` from the admin list. Returns false if they were not listed.
    pub async fn remove_admin(&self, actor_id: u64, user_id: u64) -> Result<bool, AppError> {
        self.require_admin(actor_id).await?;

        let removed = self.repo().remove_admin(user_id).await?;
        if removed {
            tracing::info!("{} revoked bot admin from {}", actor_id, user_id);
        }

        Ok(removed)
    }
}
