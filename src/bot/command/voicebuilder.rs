use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption,
};

use crate::{
    bot::command::{
        bool_option, channel_option, guild_id, integer_option, required, string_option,
        subcommand,
    },
    error::AppError,
    model::{document::BaseChannel, room::MAX_SLOT_LIMIT},
    platform::discord::DiscordPlatform,
    service::{
        permission::PermissionService,
        voice_builder::{TemplateBaseParams, VoiceBuilderService},
    },
    state::BotState,
};

pub const NAME: &str = "voicebuilder";

fn category_argument() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::Channel,
        "category",
        "Category holding the base channel",
    )
    .channel_types(vec![ChannelType::Category])
    .required(true)
}

fn name_argument(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "name", description).required(true)
}

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Creates and removes voice base channels.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "template",
                "Creates a base channel spawning rooms from a template.",
            )
            .add_sub_option(category_argument())
            .add_sub_option(name_argument("Name of the base channel"))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::String,
                "template",
                "Room name template, {user} is replaced by the member name",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Integer,
                "slots",
                "Room user limit, 0 to 99 (0 = unlimited)",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "locked",
                "Whether rooms start locked",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "custom",
                "Creates the custom base channel of a category.",
            )
            .add_sub_option(category_argument())
            .add_sub_option(name_argument("Name of the base channel")),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "delete",
                "Deletes a base channel.",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "channel_id",
                    "ID of the base channel",
                )
                .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "category",
                "Creates a new category.",
            )
            .add_sub_option(name_argument("Name of the category")),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "Lists configured base channels.",
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

    let guild_id = guild_id(command)?;
    let platform = DiscordPlatform::new(ctx);
    let service = VoiceBuilderService::new(state, &platform);

    let options = command.data.options();
    let (name, sub) = subcommand(&options)?;

    match name {
        "template" => {
            let slots = integer_option(sub, "slots")
                .unwrap_or(0)
                .clamp(0, MAX_SLOT_LIMIT as i64) as u32;

            let base_channel_id = service
                .create_template_base(TemplateBaseParams {
                    guild_id,
                    category_id: required(channel_option(sub, "category"), "category")?,
                    base_name: required(string_option(sub, "name"), "name")?.to_string(),
                    name_template: string_option(sub, "template")
                        .unwrap_or_default()
                        .to_string(),
                    slots,
                    locked: bool_option(sub, "locked").unwrap_or(false),
                })
                .await?;

            Ok(format!("Base channel created: <#{}>", base_channel_id))
        }
        "custom" => {
            let category_id = required(channel_option(sub, "category"), "category")?;
            let base_name = required(string_option(sub, "name"), "name")?;

            let base_channel_id = service
                .create_custom_base(guild_id, category_id, base_name.to_string())
                .await?;

            Ok(format!("Custom base channel created: <#{}>", base_channel_id))
        }
        "delete" => {
            let raw = required(string_option(sub, "channel_id"), "channel_id")?;
            let channel_id = raw.trim().parse::<u64>().map_err(|_| {
                AppError::BadRequest(format!("`{}` is not a valid channel ID.", raw))
            })?;

            Ok(match service.delete_base(channel_id).await? {
                BaseChannel::Template(_) => {
                    format!("Template base channel `{}` deleted.", channel_id)
                }
                BaseChannel::Custom { .. } => {
                    format!("Custom base channel `{}` deleted.", channel_id)
                }
            })
        }
        "category" => {
            let category_name = required(string_option(sub, "name"), "name")?;
            let category_id = service.create_category(guild_id, category_name).await?;

            Ok(format!("Category created: <#{}>", category_id))
        }
        "list" => {
            let entries = service.list().await?;
            if entries.is_empty() {
                return Ok("No base channels configured.".to_string());
            }

            let lines: Vec<String> = entries
                .into_iter()
                .map(|entry| match entry.base {
                    BaseChannel::Template(config) => format!(
                        "<#{}> template `{}`, slots {}, {}",
                        entry.channel_id,
                        config.name_template.unwrap_or_default(),
                        config.slots,
                        if config.locked { "locked" } else { "open" }
                    ),
                    BaseChannel::Custom { category_id } => format!(
                        "<#{}> custom base of <#{}>",
                        entry.channel_id, category_id
                    ),
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
