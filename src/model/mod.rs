//! Domain models shared by the service, data and bot layers.
//!
//! These types carry no Discord client handles. Identifiers are plain `u64` snowflakes so
//! the lifecycle logic can run against the serenity platform or an in-memory one alike.

pub mod admin;
pub mod channel;
pub mod document;
pub mod panel;
pub mod presence;
pub mod room;
