use crate::{data::store::JsonStore, error::AppError, model::admin::AdminDocument};

/// Repository for the admin allow-list document.
pub struct AdminRepository<'a> {
    store: &'a JsonStore<AdminDocument>,
}

impl<'a> AdminRepository<'a> {
    pub fn new(store: &'a JsonStore<AdminDocument>) -> Self {
        Self { store }
    }

    /// Whether the user is a bot owner or a listed admin.
    pub async fn is_admin(&self, user_id: u64) -> Result<bool, AppError> {
        Ok(self.store.load().await?.is_admin(user_id))
    }

    /// Adds a user to the admin list.
    ///
    /// # Returns
    /// - `Ok(true)` - User was added
    /// - `Ok(false)` - User was already listed
    pub async fn add_admin(&self, user_id: u64) -> Result<bool, AppError> {
        self.store
            .update(|doc| {
                if doc.admins.contains(&user_id) {
                    return false;
                }
                doc.admins.push(user_id);
                true
            })
            .await
    }

    /// Removes a user from the admin list. Bot owners are not affected.
    ///
    /// # Returns
    /// - `Ok(true)` - User was removed
    /// - `Ok(false)` - User was not listed
    pub async fn remove_admin(&self, user_id: u64) -> Result<bool, AppError> {
        self.store
            .update(|doc| {
                let before = doc.admins.len();
                doc.admins.retain(|id| *id != user_id);
                before != doc.admins.len()
            })
            .await
    }
}
