//! Channel configuration document.
//!
//! The document is read and written wholesale by the config store. Its JSON keys match the
//! files the bot has always written (`voice_base_configs`, `voice_custom_base`,
//! `voice_temporary`, ...); keys the bot does not model, such as text channel assignments,
//! are kept verbatim in `extra` so a round trip never drops them. Map keys are stored as
//! strings because flattened documents cannot decode integer keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix reserved for voice-related document keys.
pub const VOICE_KEY_PREFIX: &str = "voice_";

/// Provisioning parameters of a template base channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BaseChannelConfig {
    /// Category temporary rooms are created in.
    #[serde(default)]
    pub category: Option<u64>,
    /// Name template; falls back to the base channel's own name when absent.
    #[serde(default, rename = "temp_name")]
    pub name_template: Option<String>,
    /// User limit of created rooms, 0 meaning unlimited.
    #[serde(default)]
    pub slots: u32,
    /// Whether created rooms deny default access and get a control panel.
    #[serde(default)]
    pub locked: bool,
}

/// The single custom base channel of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBaseConfig {
    pub base_id: u64,
    pub category: u64,
}

/// Where a base channel is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseChannel {
    Template(BaseChannelConfig),
    Custom { category_id: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChannelsDocument {
    /// Known text channel assignment types, e.g. `welcome`.
    #[serde(default)]
    pub types: Vec<String>,
    /// Template base channels keyed by base voice channel id.
    #[serde(default, rename = "voice_base_configs")]
    pub base_channels: BTreeMap<String, BaseChannelConfig>,
    /// Custom base channels keyed by category id.
    #[serde(default, rename = "voice_custom_base")]
    pub custom_bases: BTreeMap<String, CustomBaseConfig>,
    /// Voice channels currently owned by the bot.
    #[serde(default, rename = "voice_temporary")]
    pub temporary_channels: Vec<u64>,
    /// Companion panel text channel of each temporary voice channel that has one.
    #[serde(default, rename = "voice_temporary_panels")]
    pub temporary_panels: BTreeMap<String, u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ChannelsDocument {
    /// Resolves a channel id to the base channel registration it belongs to, if any.
    pub fn base_channel(&self, channel_id: u64) -> Option<BaseChannel> {
        if let Some(config) = self.base_channels.get(&channel_id.to_string()) {
            return Some(BaseChannel::Template(config.clone()));
        }

        self.custom_bases
            .values()
            .find(|custom| custom.base_id == channel_id)
            .map(|custom| BaseChannel::Custom {
                category_id: custom.category,
            })
    }

    pub fn insert_template_base(&mut self, channel_id: u64, config: BaseChannelConfig) {
        self.base_channels.insert(channel_id.to_string(), config);
    }

    pub fn remove_template_base(&mut self, channel_id: u64) -> Option<BaseChannelConfig> {
        self.base_channels.remove(&channel_id.to_string())
    }

    /// Every template base with a well-formed channel id key.
    pub fn template_base_entries(&self) -> Vec<(u64, BaseChannelConfig)> {
        self.base_channels
            .iter()
            .filter_map(|(id, config)| Some((id.parse().ok()?, config.clone())))
            .collect()
    }

    pub fn custom_base_entries(&self) -> Vec<CustomBaseConfig> {
        self.custom_bases.values().cloned().collect()
    }

    /// Custom base registered for a category.
    pub fn custom_base(&self, category_id: u64) -> Option<&CustomBaseConfig> {
        self.custom_bases.get(&category_id.to_string())
    }

    pub fn insert_custom_base(&mut self, config: CustomBaseConfig) {
        self.custom_bases.insert(config.category.to_string(), config);
    }

    /// Removes the custom base whose base channel is `channel_id`.
    pub fn remove_custom_base_by_channel(&mut self, channel_id: u64) -> Option<CustomBaseConfig> {
        let category = self
            .custom_bases
            .iter()
            .find(|(_, custom)| custom.base_id == channel_id)
            .map(|(category, _)| category.clone())?;
        self.custom_bases.remove(&category)
    }

    pub fn is_temporary(&self, channel_id: u64) -> bool {
        self.temporary_channels.contains(&channel_id)
    }

    /// Adds a temporary channel id, keeping ids unique.
    ///
    /// # Returns
    /// - `true` if the id was added, `false` if it was already present
    pub fn add_temporary(&mut self, channel_id: u64) -> bool {
        if self.is_temporary(channel_id) {
            return false;
        }
        self.temporary_channels.push(channel_id);
        true
    }

    /// Removes a temporary channel id together with its recorded panel channel.
    ///
    /// # Returns
    /// - `true` if the id was present
    pub fn remove_temporary(&mut self, channel_id: u64) -> bool {
        let before = self.temporary_channels.len();
        self.temporary_channels.retain(|id| *id != channel_id);
        self.temporary_panels.remove(&channel_id.to_string());
        before != self.temporary_channels.len()
    }

    /// Records the companion panel of a temporary voice channel.
    pub fn set_temporary_panel(&mut self, voice_channel_id: u64, text_channel_id: u64) {
        self.temporary_panels
            .insert(voice_channel_id.to_string(), text_channel_id);
    }

    pub fn temporary_panel(&self, voice_channel_id: u64) -> Option<u64> {
        self.temporary_panels
            .get(&voice_channel_id.to_string())
            .copied()
    }

    /// Text channel assigned to `kind`, e.g. the welcome channel.
    pub fn text_channel(&self, kind: &str) -> Option<u64> {
        self.extra.get(kind).and_then(Value::as_u64)
    }

    pub fn set_text_channel(&mut self, kind: &str, channel_id: u64) {
        self.extra.insert(kind.to_string(), Value::from(channel_id));
        if !self.types.iter().any(|known| known == kind) {
            self.types.push(kind.to_string());
        }
    }

    /// Removes the channel assignment of `kind`.
    ///
    /// # Returns
    /// - `true` if an assignment existed
    pub fn remove_text_channel(&mut self, kind: &str) -> bool {
        self.extra.remove(kind).is_some()
    }

    /// Assignment types usable for text channels, excluding reserved voice keys.
    pub fn text_channel_types(&self) -> Vec<&str> {
        self.types
            .iter()
            .map(String::as_str)
            .filter(|kind| !kind.starts_with(VOICE_KEY_PREFIX))
            .collect()
    }
}
