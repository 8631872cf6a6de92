use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption,
};

use crate::{
    bot::command::{channel_option, required, string_option, subcommand},
    error::AppError,
    platform::discord::DiscordPlatform,
    service::{permission::PermissionService, text_channel::TextChannelService},
    state::BotState,
};

pub const NAME: &str = "setchannel";

fn type_argument() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::String,
        "type",
        "Assignment type, e.g. welcome",
    )
    .required(true)
}

fn channel_argument() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Channel, "channel", "Text channel to use")
        .channel_types(vec![ChannelType::Text])
        .required(true)
}

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Configures text channels such as welcome.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "add",
                "Assigns a text channel to a type.",
            )
            .add_sub_option(type_argument())
            .add_sub_option(channel_argument()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "edit",
                "Changes the text channel of a type.",
            )
            .add_sub_option(type_argument())
            .add_sub_option(channel_argument()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "rmv",
                "Removes a text channel assignment.",
            )
            .add_sub_option(type_argument()),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "Lists text channel assignments.",
        ))
}

pub async fn run(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<String, AppError> {
    PermissionService::new(state)
        .require_admin(command.user.id.get())
        .await?;

    let platform = DiscordPlatform::new(ctx);
    let service = TextChannelService::new(state, &platform);

    let options = command.data.options();
    let (name, sub) = subcommand(&options)?;

    match name {
        "add" | "edit" => {
            let kind = required(string_option(sub, "type"), "type")?;
            let channel_id = required(channel_option(sub, "channel"), "channel")?;
            service.set(kind, channel_id).await?;

            Ok(format!("`{}` now points to <#{}>.", kind.trim(), channel_id))
        }
        "rmv" => {
            let kind = required(string_option(sub, "type"), "type")?;
            service.remove(kind).await?;

            Ok(format!("`{}` removed from the configuration.", kind.trim()))
        }
        "list" => {
            let assignments = service.list().await?;
            if assignments.is_empty() {
                return Ok("No text channels configured.".to_string());
            }

            let lines: Vec<String> = assignments
                .into_iter()
                .map(|(kind, channel_id)| match channel_id {
                    Some(channel_id) => format!("`{}` → <#{}>", kind, channel_id),
                    None => format!("`{}` → not set", kind),
                })
                .collect();

            Ok(lines.join("\n"))
        }
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand `{}`.",
            other
        ))),
    }
}
