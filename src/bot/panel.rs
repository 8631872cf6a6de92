//! Rendering of control panels and their follow-up views.
//!
//! Component ids come from `PanelComponent`, so every button and menu built here can be
//! decoded back without any per-message state.

use serenity::all::{
    ActionRow, ActionRowComponent, ButtonStyle, Colour, CreateActionRow, CreateButton,
    CreateEmbed, CreateInputText, CreateInteractionResponseMessage, CreateMessage, CreateModal,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, InputTextStyle,
};

use crate::{
    error::AppError,
    model::{
        panel::{
            GuestAction, PanelComponent, PanelOutcome, PanelView, RoomSettings,
            CONFIGURE_MODAL_ID, INPUT_LOCKED, INPUT_NAME, INPUT_SLOTS, MAX_GUEST_SELECTION,
        },
        room::{Room, RoomKind},
    },
};

const PANEL_COLOUR: Colour = Colour::BLURPLE;

/// Members invitable in one selection.
const MAX_INVITE_SELECTION: u8 = 10;

fn slots_label(slot_limit: u32) -> String {
    if slot_limit == 0 {
        "Unlimited".to_string()
    } else {
        slot_limit.to_string()
    }
}

fn panel_embed(view: &PanelView) -> CreateEmbed {
    let description = match view.kind {
        RoomKind::Template => "Manage your temporary room with the controls below.",
        RoomKind::Custom => {
            "Use **Configure** to set up your room. The voice channel is created on the first \
             configuration."
        }
    };
    let channel = match view.voice_channel_id {
        Some(id) => format!("<#{}>", id),
        None => "Not created yet".to_string(),
    };

    CreateEmbed::new()
        .title("Room control panel")
        .description(description)
        .colour(PANEL_COLOUR)
        .field("Owner", format!("<@{}>", view.owner_id), true)
        .field("Channel", channel, true)
        .field("Name", view.name.clone(), false)
        .field("Slots", slots_label(view.slot_limit), true)
        .field("Locked", if view.locked { "Yes" } else { "No" }, true)
}

/// Builds the panel message posted in a room's companion channel.
pub fn panel_message(view: &PanelView) -> CreateMessage {
    let invite = CreateSelectMenu::new(
        PanelComponent::Invite.custom_id(),
        CreateSelectMenuKind::User {
            default_users: None,
        },
    )
    .placeholder("Invite members")
    .min_values(1)
    .max_values(MAX_INVITE_SELECTION);

    let mut buttons = vec![CreateButton::new(PanelComponent::ToggleLock.custom_id())
        .label("Lock / Unlock")
        .style(ButtonStyle::Secondary)];
    if view.kind == RoomKind::Custom {
        buttons.push(
            CreateButton::new(PanelComponent::Configure.custom_id())
                .label("Configure")
                .style(ButtonStyle::Primary),
        );
    }
    buttons.push(
        CreateButton::new(PanelComponent::ManageGuests.custom_id())
            .label("Manage guests")
            .style(ButtonStyle::Secondary),
    );
    buttons.push(
        CreateButton::new(PanelComponent::Close.custom_id())
            .label("Close room")
            .style(ButtonStyle::Danger),
    );

    CreateMessage::new()
        .content(format!("<@{}>", view.owner_id))
        .embed(panel_embed(view))
        .components(vec![
            CreateActionRow::SelectMenu(invite),
            CreateActionRow::Buttons(buttons),
        ])
}

fn input(label: &str, custom_id: &str, placeholder: String) -> CreateActionRow {
    CreateActionRow::InputText(
        CreateInputText::new(InputTextStyle::Short, label, custom_id)
            .placeholder(placeholder)
            .required(false),
    )
}

/// Configuration form of a custom room, showing current values as placeholders.
pub fn configure_modal(room: &Room) -> CreateModal {
    CreateModal::new(CONFIGURE_MODAL_ID, "Configure room").components(vec![
        input("Room name ({user} = your name)", INPUT_NAME, room.name_template.clone()),
        input("Slots (0 = unlimited)", INPUT_SLOTS, room.slot_limit.to_string()),
        input(
            "Locked? (yes / no)",
            INPUT_LOCKED,
            if room.locked { "yes" } else { "no" }.to_string(),
        ),
    ])
}

/// Reads the configuration form's inputs back into settings.
pub fn parse_settings(rows: &[ActionRow]) -> Result<RoomSettings, AppError> {
    let mut name = "";
    let mut slots = "";
    let mut locked = "";

    for component in rows.iter().flat_map(|row| row.components.iter()) {
        let ActionRowComponent::InputText(input) = component else {
            continue;
        };
        let value = input.value.as_deref().unwrap_or_default();
        match input.custom_id.as_str() {
            INPUT_NAME => name = value,
            INPUT_SLOTS => slots = value,
            INPUT_LOCKED => locked = value,
            _ => {}
        }
    }

    RoomSettings::from_inputs(name, slots, locked)
}

/// Guest selection menu listing the room's invited guests by display name.
pub fn guest_manager(guests: &[(u64, String)]) -> CreateInteractionResponseMessage {
    let response = CreateInteractionResponseMessage::new().ephemeral(true);
    if guests.is_empty() {
        return response.content("No guests invited yet.");
    }

    let options = guests
        .iter()
        .take(25)
        .map(|(id, name)| CreateSelectMenuOption::new(name.clone(), id.to_string()))
        .collect();
    let max_values = guests.len().min(MAX_GUEST_SELECTION) as u8;

    response
        .content("Select up to four guests to manage.")
        .components(vec![CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                PanelComponent::SelectGuests.custom_id(),
                CreateSelectMenuKind::String { options },
            )
            .placeholder("Guests")
            .min_values(1)
            .max_values(max_values),
        )])
}

/// Action buttons applying to the selected guests.
pub fn guest_actions(targets: &[u64]) -> CreateInteractionResponseMessage {
    let buttons = GuestAction::ALL
        .iter()
        .map(|action| {
            let component = PanelComponent::Guest {
                action: *action,
                targets: targets.to_vec(),
            };
            let style = if *action == GuestAction::Kick {
                ButtonStyle::Danger
            } else {
                ButtonStyle::Secondary
            };
            CreateButton::new(component.custom_id())
                .label(action_label(*action))
                .style(style)
        })
        .collect();

    let mentions: Vec<String> = targets.iter().map(|id| format!("<@{}>", id)).collect();

    CreateInteractionResponseMessage::new()
        .ephemeral(true)
        .content(format!("Selected: {}", mentions.join(", ")))
        .components(vec![CreateActionRow::Buttons(buttons)])
}

fn action_label(action: GuestAction) -> &'static str {
    match action {
        GuestAction::Mute => "Mute",
        GuestAction::Unmute => "Unmute",
        GuestAction::Deafen => "Deafen",
        GuestAction::Undeafen => "Undeafen",
        GuestAction::Kick => "Kick",
    }
}

fn mentions(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("<@{}>", id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reply shown to the owner after a panel action.
pub fn outcome_text(outcome: &PanelOutcome) -> String {
    match outcome {
        PanelOutcome::Invited { guests } if guests.is_empty() => "Nobody new was invited.".to_string(),
        PanelOutcome::Invited { guests } => format!("Invited {}.", mentions(guests)),
        PanelOutcome::LockToggled { locked: true } => "Room locked.".to_string(),
        PanelOutcome::LockToggled { locked: false } => "Room unlocked.".to_string(),
        PanelOutcome::Reconfigured { created: true } => {
            "Room created, moving you in.".to_string()
        }
        PanelOutcome::Reconfigured { created: false } => "Room updated.".to_string(),
        PanelOutcome::GuestsAffected { members, .. } if members.is_empty() => {
            "No guest was affected.".to_string()
        }
        PanelOutcome::GuestsAffected { action, members } => {
            format!("{}: {}.", action_label(*action), mentions(members))
        }
        PanelOutcome::Closed => "Room closed.".to_string(),
    }
}
