//! AsyncBOT Test Utils
//!
//! Provides shared testing utilities for the bot's unit and integration tests. This crate
//! offers a builder pattern for creating test contexts backed by temporary JSON config
//! stores, plus factories for serenity gateway objects.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for seeding the channel and admin documents
//! - **TestContext**: Temporary directory holding the seeded documents
//! - **fixture**: JSON fragments matching the on-disk document layout
//! - **serenity**: Factories deserializing `Member` and `VoiceState` objects
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn provisions_room() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_template_base(10, 1, "Room of {user}", 2, true)
//!         .build()?;
//!
//!     let channels_path = test.channels_path();
//!     // Point the bot's stores at the seeded files...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
pub mod serenity;
