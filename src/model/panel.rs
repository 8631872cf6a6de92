//! Control panel actions and the component ids that carry them.
//!
//! Every interactive element of a room panel has a stable `custom_id`. Interactions are
//! dispatched by decoding that id into a `PanelComponent`; the room itself is resolved from
//! the channel the interaction came from, so no per-message state is kept.

use std::fmt;
use std::str::FromStr;

use crate::{
    error::AppError,
    model::room::{Room, RoomKind, MAX_SLOT_LIMIT},
    util::parse::parse_u64_from_str,
};

const PREFIX: &str = "room:";

/// Modal submitted from the configure button of a custom room.
pub const CONFIGURE_MODAL_ID: &str = "room:configure-modal";

/// Input ids of the configure modal.
pub const INPUT_NAME: &str = "name";
pub const INPUT_SLOTS: &str = "slots";
pub const INPUT_LOCKED: &str = "locked";

/// Targets that fit in one guest action component id.
pub const MAX_GUEST_SELECTION: usize = 4;

/// Voice-state action applied to selected guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestAction {
    Mute,
    Unmute,
    Deafen,
    Undeafen,
    Kick,
}

impl GuestAction {
    pub const ALL: [GuestAction; 5] = [
        Self::Mute,
        Self::Unmute,
        Self::Deafen,
        Self::Undeafen,
        Self::Kick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::Deafen => "deafen",
            Self::Undeafen => "undeafen",
            Self::Kick => "kick",
        }
    }
}

impl fmt::Display for GuestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuestAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown guest action '{}'", value)))
    }
}

/// Interactive element of a room panel, decoded from its component id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelComponent {
    /// User select listing members to invite.
    Invite,
    ToggleLock,
    /// Opens the configure modal (custom rooms).
    Configure,
    /// Opens the guest manager.
    ManageGuests,
    /// Guest manager select; its values become the targets of the action buttons.
    SelectGuests,
    Guest {
        action: GuestAction,
        targets: Vec<u64>,
    },
    Close,
}

impl PanelComponent {
    pub fn custom_id(&self) -> String {
        match self {
            Self::Invite => format!("{}invite", PREFIX),
            Self::ToggleLock => format!("{}lock", PREFIX),
            Self::Configure => format!("{}configure", PREFIX),
            Self::ManageGuests => format!("{}guests", PREFIX),
            Self::SelectGuests => format!("{}guest-select", PREFIX),
            Self::Guest { action, targets } => {
                let targets: Vec<String> = targets.iter().map(u64::to_string).collect();
                format!("{}guest:{}:{}", PREFIX, action, targets.join("."))
            }
            Self::Close => format!("{}close", PREFIX),
        }
    }

    /// Decodes a component id.
    ///
    /// # Returns
    /// - `Ok(Some(component))` - Id belongs to a room panel
    /// - `Ok(None)` - Id belongs to some other interactive message
    /// - `Err(AppError)` - Id has the panel prefix but is malformed
    pub fn parse(custom_id: &str) -> Result<Option<Self>, AppError> {
        let Some(rest) = custom_id.strip_prefix(PREFIX) else {
            return Ok(None);
        };

        let component = match rest {
            "invite" => Self::Invite,
            "lock" => Self::ToggleLock,
            "configure" => Self::Configure,
            "guests" => Self::ManageGuests,
            "guest-select" => Self::SelectGuests,
            "close" => Self::Close,
            other => {
                let Some(guest) = other.strip_prefix("guest:") else {
                    return Ok(None);
                };
                let (action, targets) = guest.split_once(':').ok_or_else(|| {
                    AppError::BadRequest(format!("Malformed guest action id '{}'", custom_id))
                })?;

                let targets = targets
                    .split('.')
                    .filter(|id| !id.is_empty())
                    .map(parse_u64_from_str)
                    .collect::<Result<Vec<u64>, AppError>>()?;

                Self::Guest {
                    action: action.parse()?,
                    targets,
                }
            }
        };

        Ok(Some(component))
    }
}

/// Reconfiguration submitted by a custom room owner. `None` fields stay unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomSettings {
    pub name_template: Option<String>,
    pub slot_limit: Option<u32>,
    pub locked: Option<bool>,
}

impl RoomSettings {
    /// Builds settings from the raw modal inputs.
    ///
    /// Blank inputs leave the field unchanged. A slot count that is not a number, or is
    /// negative, becomes 0 (unlimited); counts above Discord's limit are clamped. The locked
    /// input accepts yes/no style answers.
    ///
    /// # Returns
    /// - `Ok(RoomSettings)` - Parsed settings
    /// - `Err(AppError::BadRequest)` - Locked input is not a recognised yes/no answer
    pub fn from_inputs(name: &str, slots: &str, locked: &str) -> Result<Self, AppError> {
        let name = name.trim();
        let slots = slots.trim();
        let locked = locked.trim().to_lowercase();

        let slot_limit = if slots.is_empty() {
            None
        } else {
            Some(match slots.parse::<i64>() {
                Ok(count) => count.clamp(0, MAX_SLOT_LIMIT as i64) as u32,
                Err(_) => 0,
            })
        };

        let locked = match locked.as_str() {
            "" => None,
            "yes" | "y" | "true" | "1" | "on" | "sim" | "s" => Some(true),
            "no" | "n" | "false" | "0" | "off" | "não" | "nao" => Some(false),
            other => {
                return Err(AppError::BadRequest(format!(
                    "'{}' is not a valid answer for locked, use yes or no.",
                    other
                )))
            }
        };

        Ok(Self {
            name_template: (!name.is_empty()).then(|| name.to_string()),
            slot_limit,
            locked,
        })
    }
}

/// Owner action dispatched against a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Invite(Vec<u64>),
    ToggleLock,
    Reconfigure(RoomSettings),
    GuestAction {
        action: GuestAction,
        targets: Vec<u64>,
    },
    Close,
}

/// Result of a dispatched panel action, rendered back to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    Invited { guests: Vec<u64> },
    LockToggled { locked: bool },
    Reconfigured { created: bool },
    GuestsAffected { action: GuestAction, members: Vec<u64> },
    Closed,
}

/// Data shown on a room's control panel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub owner_id: u64,
    pub kind: RoomKind,
    pub voice_channel_id: Option<u64>,
    pub name: String,
    pub slot_limit: u32,
    pub locked: bool,
}

impl PanelView {
    pub fn from_room(room: &Room, owner_display_name: &str) -> Self {
        Self {
            owner_id: room.owner_id,
            kind: room.kind,
            voice_channel_id: room.voice_channel_id,
            name: room.display_name(owner_display_name),
            slot_limit: room.slot_limit,
            locked: room.locked,
        }
    }
}
