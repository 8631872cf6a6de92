//! Service layer for the bot's business logic.
//!
//! Services sit between the event handlers and the data layer. They borrow the shared
//! `BotState` and, where Discord is involved, a `Platform` implementation for the duration
//! of one event.

pub mod lifecycle;
pub mod panel;
pub mod permission;
pub mod reconcile;
pub mod registry;
pub mod text_channel;
pub mod voice_builder;
pub mod welcome;

#[cfg(test)]
mod test;
