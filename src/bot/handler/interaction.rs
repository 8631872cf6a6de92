//! Interaction handler: slash commands, panel components and the configuration modal.
//!
//! Panel components carry no per-message state. The room is resolved from the channel the
//! interaction came from, and guest targets travel inside the component ids.

use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, Interaction, ModalInteraction,
};

use crate::{
    bot::{
        command,
        panel::{configure_modal, guest_actions, guest_manager, outcome_text, parse_settings},
    },
    error::{room::RoomError, AppError},
    model::panel::{PanelAction, PanelComponent, CONFIGURE_MODAL_ID, MAX_GUEST_SELECTION},
    platform::{discord::DiscordPlatform, Platform},
    service::panel::ControlPanelService,
    state::BotState,
    util::parse::parse_u64_from_str,
};

/// Handles the interaction_create event.
pub async fn handle_interaction_create(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => command::dispatch(state, &ctx, &command).await,
        Interaction::Component(component) => handle_component(state, &ctx, &component).await,
        Interaction::Modal(modal) => handle_modal(state, &ctx, &modal).await,
        _ => {}
    }
}

fn ephemeral(content: String) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Values picked in a select menu, as ids.
fn selected_ids(component: &ComponentInteraction) -> Result<Vec<u64>, AppError> {
    match &component.data.kind {
        ComponentInteractionDataKind::UserSelect { values } => {
            Ok(values.iter().map(|id| id.get()).collect())
        }
        ComponentInteractionDataKind::StringSelect { values } => values
            .iter()
            .map(|value| parse_u64_from_str(value))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

async fn handle_component(state: &BotState, ctx: &Context, component: &ComponentInteraction) {
    let decoded = match PanelComponent::parse(&component.data.custom_id) {
        Ok(Some(decoded)) => decoded,
        Ok(None) => return,
        Err(e) => {
            respond_component(ctx, component, ephemeral(e.into_reply())).await;
            return;
        }
    };

    let platform = DiscordPlatform::new(ctx);
    let actor_id = component.user.id.get();
    let channel_id = component.channel_id.get();

    // The panel channel is deleted by a close, so the reply is sent before dispatching.
    if decoded == PanelComponent::Close {
        close_room(state, ctx, &platform, component).await;
        return;
    }

    let response = component_response(state, &platform, component, decoded, actor_id, channel_id)
        .await
        .unwrap_or_else(|e| ephemeral(e.into_reply()));

    respond_component(ctx, component, response).await;
}

async fn component_response(
    state: &BotState,
    platform: &DiscordPlatform,
    component: &ComponentInteraction,
    decoded: PanelComponent,
    actor_id: u64,
    channel_id: u64,
) -> Result<CreateInteractionResponse, AppError> {
    let panel = ControlPanelService::new(state, platform);

    let action = match decoded {
        PanelComponent::Invite => PanelAction::Invite(selected_ids(component)?),
        PanelComponent::ToggleLock => PanelAction::ToggleLock,
        PanelComponent::Guest { action, targets } => PanelAction::GuestAction { action, targets },
        PanelComponent::Close => PanelAction::Close,
        PanelComponent::Configure => {
            let room = panel.owned_room(actor_id, channel_id).await?;
            return Ok(CreateInteractionResponse::Modal(configure_modal(&room)));
        }
        PanelComponent::ManageGuests => {
            let room = panel.owned_room(actor_id, channel_id).await?;

            let mut guests = Vec::new();
            for guest_id in &room.invited_guests {
                let name = platform
                    .member(room.guild_id, *guest_id)
                    .await
                    .map(|member| member.display_name)
                    .unwrap_or_else(|| guest_id.to_string());
                guests.push((*guest_id, name));
            }

            return Ok(CreateInteractionResponse::Message(guest_manager(&guests)));
        }
        PanelComponent::SelectGuests => {
            panel.owned_room(actor_id, channel_id).await?;

            let mut targets = selected_ids(component)?;
            targets.truncate(MAX_GUEST_SELECTION);
            if targets.is_empty() {
                return Err(RoomError::NoGuestsSelected.into());
            }

            return Ok(CreateInteractionResponse::Message(guest_actions(&targets)));
        }
    };

    let outcome = panel.dispatch(actor_id, channel_id, action).await?;

    Ok(ephemeral(outcome_text(&outcome)))
}

async fn close_room(
    state: &BotState,
    ctx: &Context,
    platform: &DiscordPlatform,
    component: &ComponentInteraction,
) {
    let panel = ControlPanelService::new(state, platform);
    let actor_id = component.user.id.get();
    let channel_id = component.channel_id.get();

    if let Err(e) = panel.owned_room(actor_id, channel_id).await {
        respond_component(ctx, component, ephemeral(e.into_reply())).await;
        return;
    }

    respond_component(ctx, component, ephemeral("Closing the room...".to_string())).await;

    if let Err(e) = panel
        .dispatch(actor_id, channel_id, PanelAction::Close)
        .await
    {
        tracing::error!("Failed to close room of panel {}: {}", channel_id, e);
    }
}

async fn respond_component(
    ctx: &Context,
    component: &ComponentInteraction,
    response: CreateInteractionResponse,
) {
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::warn!(
            "Failed to respond to component {}: {:?}",
            component.data.custom_id,
            e
        );
    }
}

async fn handle_modal(state: &BotState, ctx: &Context, modal: &ModalInteraction) {
    if modal.data.custom_id != CONFIGURE_MODAL_ID {
        return;
    }

    // Creating the voice channel and moving the owner can outlast the response window.
    if let Err(e) = modal.defer_ephemeral(&ctx.http).await {
        tracing::warn!("Failed to defer configuration modal: {:?}", e);
        return;
    }

    let platform = DiscordPlatform::new(ctx);
    let result = match parse_settings(&modal.data.components) {
        Ok(settings) => {
            ControlPanelService::new(state, &platform)
                .dispatch(
                    modal.user.id.get(),
                    modal.channel_id.get(),
                    PanelAction::Reconfigure(settings),
                )
                .await
        }
        Err(e) => Err(e),
    };

    let content = match result {
        Ok(outcome) => outcome_text(&outcome),
        Err(e) => e.into_reply(),
    };

    if let Err(e) = modal
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::warn!("Failed to answer configuration modal: {:?}", e);
    }
}
