use serenity::all::{ChannelId, Colour, Context, CreateEmbed, CreateMessage, Member};

use crate::{service::welcome::WelcomeService, state::BotState};

/// Handles the guild_member_addition event by posting a welcome card
pub async fn handle_guild_member_addition(state: &BotState, ctx: Context, new_member: Member) {
    if new_member.user.bot {
        return;
    }

    let welcome = match WelcomeService::new(state)
        .welcome_for(new_member.user.id.get(), new_member.face())
        .await
    {
        Ok(Some(welcome)) => welcome,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to build welcome message: {}", e);
            return;
        }
    };

    let embed = CreateEmbed::new()
        .description(format!("{}\n\n🆔 : `{}`", welcome.phrase, welcome.member_id))
        .thumbnail(welcome.avatar_url)
        .colour(Colour::DARK_PURPLE);

    if let Err(e) = ChannelId::new(welcome.channel_id)
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        tracing::warn!(
            "Failed to post welcome for {} in {}: {:?}",
            welcome.member_id,
            welcome.channel_id,
            e
        );
    }
}
