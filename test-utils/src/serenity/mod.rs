//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating Serenity structs received from the
//! gateway (members, voice states) for testing purposes. These factories create valid
//! Serenity objects by deserializing JSON, simulating what Discord's gateway would send.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_voice_state};
//!
//! let member = create_test_member(1, 42, "alice", Some("Alice"), false);
//! let state = create_test_voice_state(1, 42, Some(10), Some(&member));
//! ```
//!
//! # Available Factories
//!
//! - `member::create_test_member` - Create Serenity Member objects
//! - `voice_state::create_test_voice_state` - Create Serenity VoiceState objects

pub mod member;
pub mod voice_state;

pub use member::create_test_member;
pub use voice_state::create_test_voice_state;
