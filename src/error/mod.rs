//! Error types and user-facing reply mapping.
//!
//! This module provides the bot's error hierarchy and the conversion logic that turns
//! errors into the ephemeral messages shown to whoever triggered an interaction. The
//! `AppError` enum is the top-level error type that wraps domain-specific errors; nothing
//! in the bot raises past an event handler, every failure ends as a reply or a log line.

pub mod auth;
pub mod config;
pub mod internal;
pub mod room;

use thiserror::Error;

use crate::error::{
    auth::AuthError, config::ConfigError, internal::InternalError, room::RoomError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot and provides a single
/// conversion to a user-visible reply. Most variants use `#[from]` for automatic error
/// conversion. Domain-specific errors like `AuthError` and `RoomError` carry their own
/// reply text, while infrastructure variants collapse into a generic message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Actor is not allowed to perform the requested action.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Room lifecycle or control panel precondition failed.
    #[error(transparent)]
    RoomErr(#[from] RoomError),

    /// Internal issue such as a malformed identifier.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Config store file could not be read or written.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Config store document could not be (de)serialized.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Resource not found error with a message safe to show to the user.
    #[error("{0}")]
    NotFound(String),

    /// Invalid input error with a message safe to show to the user.
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the message sent back on the interaction.
    ///
    /// Permission and room errors return their own text. Not-found and bad-request
    /// messages are passed through unchanged. Everything else is logged with full details
    /// and answered with a generic message so internals do not leak into the channel.
    ///
    /// # Returns
    /// - User-visible reply text
    pub fn into_reply(self) -> String {
        match self {
            Self::AuthErr(err) => err.reply().to_string(),
            Self::RoomErr(err) => err.reply().to_string(),
            Self::NotFound(msg) | Self::BadRequest(msg) => msg,
            Self::InternalErr(err) => {
                tracing::debug!("Rejected malformed input: {}", err);
                "That selection is not valid anymore.".to_string()
            }
            err => {
                tracing::error!("Interaction failed: {}", err);
                "Something went wrong, please try again.".to_string()
            }
        }
    }
}
