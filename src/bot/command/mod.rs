//! Slash commands and their dispatch.
//!
//! Each command module exposes its `NAME`, a `register` builder used when the bot connects,
//! and a `run` function returning the reply text. Errors are turned into replies here.

pub mod admin;
pub mod ping;
pub mod setchannel;
pub mod voicebuilder;

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, ResolvedOption, ResolvedValue,
};

use crate::{error::AppError, state::BotState};

/// Every global command registered by the bot.
pub fn commands() -> Vec<CreateCommand> {
    vec![
        voicebuilder::register(),
        setchannel::register(),
        admin::register_add(),
        admin::register_remove(),
        ping::register(),
    ]
}

/// Runs a slash command and replies with its outcome.
pub async fn dispatch(state: &BotState, ctx: &Context, command: &CommandInteraction) {
    let result = match command.data.name.as_str() {
        voicebuilder::NAME => voicebuilder::run(state, ctx, command).await,
        setchannel::NAME => setchannel::run(state, ctx, command).await,
        admin::ADD_NAME => admin::run_add(state, command).await,
        admin::REMOVE_NAME => admin::run_remove(state, command).await,
        ping::NAME => ping::run(ctx).await,
        other => {
            tracing::warn!("Received unknown command {}", other);
            return;
        }
    };

    let content = result.unwrap_or_else(AppError::into_reply);
    let ephemeral = command.data.name != ping::NAME;

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(ephemeral),
    );
    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to reply to /{}: {:?}", command.data.name, e);
    }
}

/// Guild the command was used in.
pub(crate) fn guild_id(command: &CommandInteraction) -> Result<u64, AppError> {
    command
        .guild_id
        .map(|id| id.get())
        .ok_or_else(|| AppError::BadRequest("This command only works in a server.".to_string()))
}

/// Name and options of the invoked subcommand.
pub(crate) fn subcommand<'o, 'a>(
    options: &'o [ResolvedOption<'a>],
) -> Result<(&'a str, &'o [ResolvedOption<'a>]), AppError> {
    options
        .iter()
        .find_map(|option| match &option.value {
            ResolvedValue::SubCommand(sub) => Some((option.name, sub.as_slice())),
            _ => None,
        })
        .ok_or_else(|| AppError::BadRequest("A subcommand is required.".to_string()))
}

fn find<'o, 'a>(options: &'o [ResolvedOption<'a>], name: &str) -> Option<&'o ResolvedValue<'a>> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub(crate) fn string_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    match find(options, name)? {
        ResolvedValue::String(value) => Some(*value),
        _ => None,
    }
}

pub(crate) fn integer_option(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    match find(options, name)? {
        ResolvedValue::Integer(value) => Some(*value),
        _ => None,
    }
}

pub(crate) fn bool_option(options: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    match find(options, name)? {
        ResolvedValue::Boolean(value) => Some(*value),
        _ => None,
    }
}

pub(crate) fn channel_option(options: &[ResolvedOption<'_>], name: &str) -> Option<u64> {
    match find(options, name)? {
        ResolvedValue::Channel(channel) => Some(channel.id.get()),
        _ => None,
    }
}

pub(crate) fn user_option(options: &[ResolvedOption<'_>], name: &str) -> Option<u64> {
    match find(options, name)? {
        ResolvedValue::User(user, _) => Some(user.id.get()),
        _ => None,
    }
}

/// Turns a missing required option into a reply.
pub(crate) fn required<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing option `{}`.", name)))
}
