//! Discord gateway integration.
//!
//! The bot reacts to voice presence changes to provision and tear down temporary rooms,
//! serves slash commands and control panel interactions, and greets new members.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and channel cache, needed for channel lookups
//! - `GUILD_VOICE_STATES` - Voice presence changes and channel occupancy
//! - `GUILD_MEMBERS` - Member joins for the welcome message (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod panel;
pub mod start;
pub mod status;
