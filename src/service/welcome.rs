use crate::{
    data::channel_config::ChannelConfigRepository, error::AppError,
    service::text_channel::WELCOME_CHANNEL_TYPE, state::BotState, util::phrase::welcome_phrase,
};

/// Greeting to post when a member joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub channel_id: u64,
    pub phrase: String,
    pub member_id: u64,
    pub avatar_url: String,
}

pub struct WelcomeService<'a> {
    state: &'a BotState,
}

impl<'a> WelcomeService<'a> {
    pub fn new(state: &'a BotState) -> Self {
        Self { state }
    }

    /// Builds the greeting for a new member, or `None` when no welcome channel is assigned.
    pub async fn welcome_for(
        &self,
        member_id: u64,
        avatar_url: String,
    ) -> Result<Option<Welcome>, AppError> {
        let channel_id = ChannelConfigRepository::new(&self.state.channels)
            .text_channel(WELCOME_CHANNEL_TYPE)
            .await?;

        Ok(channel_id.map(|channel_id| Welcome {
            channel_id,
            phrase: welcome_phrase(&format!("<@{}>", member_id)),
            member_id,
            avatar_url,
        }))
    }
}
