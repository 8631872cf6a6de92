use crate::{
    data::store::JsonStore,
    error::{room::RoomError, AppError},
    model::document::{BaseChannel, BaseChannelConfig, ChannelsDocument, CustomBaseConfig},
};

/// Repository for the channel configuration document.
///
/// Provides the reads and mutations the service layer performs on base channel
/// registrations, the temporary channel set and text channel assignments. Each mutation is
/// one wholesale read-modify-write of the document.
pub struct ChannelConfigRepository<'a> {
    /// Store holding the channel document.
    store: &'a JsonStore<ChannelsDocument>,
}

impl<'a> ChannelConfigRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `store` - Channel document store reference
    pub fn new(store: &'a JsonStore<ChannelsDocument>) -> Self {
        Self { store }
    }

    /// Loads the full document.
    pub async fn load(&self) -> Result<ChannelsDocument, AppError> {
        self.store.load().await
    }

    /// Looks up the base channel registration of a voice channel.
    ///
    /// # Returns
    /// - `Ok(Some(BaseChannel))` - Channel is a template or custom base
    /// - `Ok(None)` - Channel is not a base channel
    pub async fn find_base_channel(&self, channel_id: u64) -> Result<Option<BaseChannel>, AppError> {
        Ok(self.store.load().await?.base_channel(channel_id))
    }

    pub async fn is_temporary(&self, channel_id: u64) -> Result<bool, AppError> {
        Ok(self.store.load().await?.is_temporary(channel_id))
    }

    /// Ids of every persisted temporary voice channel.
    pub async fn temporary_channels(&self) -> Result<Vec<u64>, AppError> {
        Ok(self.store.load().await?.temporary_channels)
    }

    /// Recorded panel channel of a temporary voice channel.
    pub async fn temporary_panel(&self, voice_channel_id: u64) -> Result<Option<u64>, AppError> {
        Ok(self.store.load().await?.temporary_panel(voice_channel_id))
    }

    /// Adds a voice channel to the temporary set, recording its panel channel if any.
    ///
    /// # Arguments
    /// - `voice_channel_id` - Newly created temporary voice channel
    /// - `panel_channel_id` - Companion text channel, if the room has one
    pub async fn register_temporary(
        &self,
        voice_channel_id: u64,
        panel_channel_id: Option<u64>,
    ) -> Result<(), AppError> {
        self.store
            .update(|doc| {
                doc.add_temporary(voice_channel_id);
                if let Some(panel_channel_id) = panel_channel_id {
                    doc.set_temporary_panel(voice_channel_id, panel_channel_id);
                }
            })
            .await
    }

    /// Removes a voice channel from the temporary set.
    ///
    /// # Returns
    /// - `Ok(true)` - Channel was in the set
    /// - `Ok(false)` - Channel was not tracked
    pub async fn release_temporary(&self, voice_channel_id: u64) -> Result<bool, AppError> {
        self.store
            .update(|doc| doc.remove_temporary(voice_channel_id))
            .await
    }

    /// Registers a template base channel.
    pub async fn create_template_base(
        &self,
        base_channel_id: u64,
        config: BaseChannelConfig,
    ) -> Result<(), AppError> {
        self.store
            .update(|doc| doc.insert_template_base(base_channel_id, config))
            .await
    }

    /// Whether the category already has its custom base channel.
    pub async fn has_custom_base(&self, category_id: u64) -> Result<bool, AppError> {
        Ok(self.store.load().await?.custom_base(category_id).is_some())
    }

    /// Registers the custom base channel of a category.
    ///
    /// # Returns
    /// - `Ok(())` - Custom base registered
    /// - `Err(RoomError::CustomBaseExists)` - Category already has one
    pub async fn create_custom_base(&self, config: CustomBaseConfig) -> Result<(), AppError> {
        let category_id = config.category;
        let inserted = self
            .store
            .update(|doc| {
                if doc.custom_base(category_id).is_some() {
                    return false;
                }
                doc.insert_custom_base(config);
                true
            })
            .await?;

        if !inserted {
            return Err(RoomError::CustomBaseExists { category_id }.into());
        }

        Ok(())
    }

    /// Removes a base channel registration, template or custom.
    ///
    /// # Returns
    /// - `Ok(Some(BaseChannel))` - The registration that was removed
    /// - `Ok(None)` - Channel was not a base channel
    pub async fn remove_base(&self, channel_id: u64) -> Result<Option<BaseChannel>, AppError> {
        self.store
            .update(|doc| {
                if let Some(config) = doc.remove_template_base(channel_id) {
                    return Some(BaseChannel::Template(config));
                }
                doc.remove_custom_base_by_channel(channel_id)
                    .map(|custom| BaseChannel::Custom {
                        category_id: custom.category,
                    })
            })
            .await
    }

    /// Assigns a text channel to a named type such as `welcome`.
    pub async fn set_text_channel(&self, kind: &str, channel_id: u64) -> Result<(), AppError> {
        self.store
            .update(|doc| doc.set_text_channel(kind, channel_id))
            .await
    }

    /// Removes a text channel assignment.
    ///
    /// # Returns
    /// - `Ok(true)` - Assignment removed
    /// - `Ok(false)` - Type was not assigned
    pub async fn remove_text_channel(&self, kind: &str) -> Result<bool, AppError> {
        self.store.update(|doc| doc.remove_text_channel(kind)).await
    }

    pub async fn text_channel(&self, kind: &str) -> Result<Option<u64>, AppError> {
        Ok(self.store.load().await?.text_channel(kind))
    }
}
