use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues indicating unexpected input reaching the bot
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Raised for component ids and select values that no longer decode into
    /// a Discord snowflake.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },
}
