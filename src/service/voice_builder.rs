//! Admin operations registering and removing base channels.

use crate::{
    data::channel_config::ChannelConfigRepository,
    error::{room::RoomError, AppError},
    model::{
        channel::{ChannelKind, NewChannel},
        document::{BaseChannel, BaseChannelConfig, CustomBaseConfig},
        room::{DEFAULT_NAME_TEMPLATE, MAX_SLOT_LIMIT},
    },
    platform::Platform,
    state::BotState,
};

/// Parameters of a template base channel to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBaseParams {
    pub guild_id: u64,
    pub category_id: u64,
    /// Name of the base channel itself.
    pub base_name: String,
    /// Name template of the rooms it spawns; blank uses the default template.
    pub name_template: String,
    pub slots: u32,
    pub locked: bool,
}

/// A configured base channel, as listed to admins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseChannelEntry {
    pub channel_id: u64,
    pub base: BaseChannel,
}

pub struct VoiceBuilderService<'a, P: Platform> {
    state: &'a BotState,
    platform: &'a P,
}

impl<'a, P: Platform> VoiceBuilderService<'a, P> {
    pub fn new(state: &'a BotState, platform: &'a P) -> Self {
        Self { state, platform }
    }

    fn repo(&self) -> ChannelConfigRepository<'a> {
        ChannelConfigRepository::new(&self.state.channels)
    }

    /// Creates a base channel that spawns rooms from a fixed template.
    ///
    /// # Returns
    /// - `Ok(u64)` - Id of the new base channel
    /// - `Err(AppError::DiscordErr)` - The platform refused to create the channel
    pub async fn create_template_base(&self, params: TemplateBaseParams) -> Result<u64, AppError> {
        let base_channel_id = self
            .platform
            .create_channel(
                params.guild_id,
                NewChannel {
                    name: params.base_name,
                    kind: ChannelKind::Voice,
                    parent_id: Some(params.category_id),
                    user_limit: 0,
                    overwrites: Vec::new(),
                },
            )
            .await?;

        let name_template = params.name_template.trim();
        let config = BaseChannelConfig {
            category: Some(params.category_id),
            name_template: Some(if name_template.is_empty() {
                DEFAULT_NAME_TEMPLATE.to_string()
            } else {
                name_template.to_string()
            }),
            slots: params.slots.min(MAX_SLOT_LIMIT),
            locked: params.locked,
        };
        self.repo()
            .create_template_base(base_channel_id, config)
            .await?;

        tracing::info!(
            "Created template base {} in category {}",
            base_channel_id,
            params.category_id
        );

        Ok(base_channel_id)
    }

    /// Creates the custom base channel of a category.
    ///
    /// # Returns
    /// - `Ok(u64)` - Id of the new base channel
    /// - `Err(RoomError::CustomBaseExists)` - The category already has one
    pub async fn create_custom_base(
        &self,
        guild_id: u64,
        category_id: u64,
        base_name: String,
    ) -> Result<u64, AppError> {
        let repo = self.repo();
        if repo.has_custom_base(category_id).await? {
            return Err(RoomError::CustomBaseExists { category_id }.into());
        }

        let base_channel_id = self
            .platform
            .create_channel(
                guild_id,
                NewChannel {
                    name: base_name,
                    kind: ChannelKind::Voice,
                    parent_id: Some(category_id),
                    user_limit: 0,
                    overwrites: Vec::new(),
                },
            )
            .await?;

        // Another admin may have registered one while the channel was being created.
        if let Err(e) = repo
            .create_custom_base(CustomBaseConfig {
                base_id: base_channel_id,
                category: category_id,
            })
            .await
        {
            if let Err(delete_err) = self.platform.delete_channel(base_channel_id).await {
                tracing::warn!(
                    "Failed to delete duplicate custom base {}: {}",
                    base_channel_id,
                    delete_err
                );
            }
            return Err(e);
        }

        tracing::info!(
            "Created custom base {} in category {}",
            base_channel_id,
            category_id
        );

        Ok(base_channel_id)
    }

    /// Deletes a base channel, template or custom, and its registration.
    ///
    /// # Returns
    /// - `Ok(BaseChannel)` - The registration that was removed
    /// - `Err(RoomError::UnknownBaseChannel)` - Id is not a registered base channel
    pub async fn delete_base(&self, channel_id: u64) -> Result<BaseChannel, AppError> {
        let removed = self
            .repo()
            .remove_base(channel_id)
            .await?
            .ok_or(RoomError::UnknownBaseChannel { channel_id })?;

        if let Err(e) = self.platform.delete_channel(channel_id).await {
            tracing::warn!("Failed to delete base channel {}: {}", channel_id, e);
        }

        tracing::info!("Deleted base channel {}", channel_id);

        Ok(removed)
    }

    /// Creates a new category to hold base channels.
    pub async fn create_category(&self, guild_id: u64, name: &str) -> Result<u64, AppError> {
        let name = name.trim();
        let name = if name.is_empty() { "New Category" } else { name };

        let category_id = self
            .platform
            .create_channel(
                guild_id,
                NewChannel {
                    name: name.to_string(),
                    kind: ChannelKind::Category,
                    parent_id: None,
                    user_limit: 0,
                    overwrites: Vec::new(),
                },
            )
            .await?;

        tracing::info!("Created category {} ({})", name, category_id);

        Ok(category_id)
    }

    /// Every configured base channel, templates first, each group ordered by id.
    pub async fn list(&self) -> Result<Vec<BaseChannelEntry>, AppError> {
        let doc = self.repo().load().await?;

        let mut templates: Vec<BaseChannelEntry> = doc
            .template_base_entries()
            .into_iter()
            .map(|(channel_id, config)| BaseChannelEntry {
                channel_id,
                base: BaseChannel::Template(config),
            })
            .collect();
        let mut customs: Vec<BaseChannelEntry> = doc
            .custom_base_entries()
            .into_iter()
            .map(|custom| BaseChannelEntry {
                channel_id: custom.base_id,
                base: BaseChannel::Custom {
                    category_id: custom.category,
                },
            })
            .collect();

        templates.sort_by_key(|entry| entry.channel_id);
        customs.sort_by_key(|entry| entry.channel_id);
        templates.extend(customs);

        Ok(templates)
    }
}
