use crate::{
    data::channel_config::ChannelConfigRepository,
    error::AppError,
    model::{channel::ChannelKind, document::VOICE_KEY_PREFIX},
    platform::Platform,
    state::BotState,
};

/// Assignment type used for the member welcome channel.
pub const WELCOME_CHANNEL_TYPE: &str = "welcome";

/// Named text channel assignments such as `welcome`.
pub struct TextChannelService<'a, P: Platform> {
    state: &'a BotState,
    platform: &'a P,
}

impl<'a, P: Platform> TextChannelService<'a, P> {
    pub fn new(state: &'a BotState, platform: &'a P) -> Self {
        Self { state, platform }
    }

    fn repo(&self) -> ChannelConfigRepository<'a> {
        ChannelConfigRepository::new(&self.state.channels)
    }

    /// Assigns a text channel to `kind`, replacing any previous assignment.
    ///
    /// # Returns
    /// - `Ok(())` - Assignment stored
    /// - `Err(AppError::BadRequest)` - Reserved or empty type, or the channel is not text
    pub async fn set(&self, kind: &str, channel_id: u64) -> Result<(), AppError> {
        let kind = validate_kind(kind)?;

        let is_text = self
            .platform
            .channel(channel_id)
            .await
            .is_some_and(|channel| channel.kind == ChannelKind::Text);
        if !is_text {
            return Err(AppError::BadRequest(
                "This command only accepts text channels.".to_string(),
            ));
        }

        self.repo().set_text_channel(kind, channel_id).await?;
        tracing::info!("Assigned text channel {} as {}", channel_id, kind);

        Ok(())
    }

    /// Removes the assignment of `kind`.
    ///
    /// # Returns
    /// - `Ok(())` - Assignment removed
    /// - `Err(AppError::NotFound)` - Nothing was assigned to `kind`
    pub async fn remove(&self, kind: &str) -> Result<(), AppError> {
        let kind = validate_kind(kind)?;

        if !self.repo().remove_text_channel(kind).await? {
            return Err(AppError::NotFound(format!(
                "`{}` is not configured.",
                kind
            )));
        }

        tracing::info!("Removed text channel assignment {}", kind);

        Ok(())
    }

    /// Known assignment types with their current channel, if set.
    pub async fn list(&self) -> Result<Vec<(String, Option<u64>)>, AppError> {
        let doc = self.repo().load().await?;

        Ok(doc
            .text_channel_types()
            .into_iter()
            .map(|kind| (kind.to_string(), doc.text_channel(kind)))
            .collect())
    }
}

fn validate_kind(kind: &str) -> Result<&str, AppError> {
    let kind = kind.trim();
    if kind.is_empty() {
        return Err(AppError::BadRequest("A type name is required.".to_string()));
    }
    if kind.starts_with(VOICE_KEY_PREFIX) {
        return Err(AppError::BadRequest(format!(
            "`{}` is reserved for voice configuration.",
            kind
        )));
    }
    Ok(kind)
}
