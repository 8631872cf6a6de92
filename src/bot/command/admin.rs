use serenity::all::{CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption};

use crate::{
    bot::command::{required, user_option},
    error::AppError,
    service::permission::PermissionService,
    state::BotState,
};

pub const ADD_NAME: &str = "addadmin";
pub const REMOVE_NAME: &str = "rmvadmin";

fn user_argument() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "user", "Member to update").required(true)
}

pub fn register_add() -> CreateCommand {
    CreateCommand::new(ADD_NAME)
        .description("Grants bot admin access to a member.")
        .add_option(user_argument())
}

pub fn register_remove() -> CreateCommand {
    CreateCommand::new(REMOVE_NAME)
        .description("Revokes bot admin access from a member.")
        .add_option(user_argument())
}

pub async fn run_add(state: &BotState, command: &CommandInteraction) -> Result<String, AppError> {
    let options = command.data.options();
    let user_id = required(user_option(&options, "user"), "user")?;

    let added = PermissionService::new(state)
        .add_admin(command.user.id.get(), user_id)
        .await?;

    Ok(if added {
        format!("<@{}> is now a bot admin.", user_id)
    } else {
        format!("<@{}> is already a bot admin.", user_id)
    })
}

pub async fn run_remove(
    state: &BotState,
    command: &CommandInteraction,
) -> Result<String, AppError> {
    let options = command.data.options();
    let user_id = required(user_option(&options, "user"), "user")?;

    let removed = PermissionService::new(state)
        .remove_admin(command.user.id.get(), user_id)
        .await?;

    Ok(if removed {
        format!("<@{}> is no longer a bot admin.", user_id)
    } else {
        format!("<@{}> is not a bot admin.", user_id)
    })
}
