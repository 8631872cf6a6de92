use serde_json::{json, Map, Value};

use crate::{
    context::{TestContext, ADMINS_FILE, CHANNELS_FILE},
    error::TestError,
    fixture,
};

/// Builder for creating test contexts with seeded config documents.
///
/// Provides a fluent interface for describing the channel document (base channels, custom
/// bases, temporary channels, text channel assignments) and the admin allow-list. Call
/// `build()` to write both documents into a fresh temporary directory.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_template_base(10, 1, "Room of {user}", 2, true)
///     .with_custom_base(1, 11)
///     .with_admin(7)
///     .build()?;
/// ```
pub struct TestBuilder {
    /// Channel document under construction.
    channels: Map<String, Value>,
    /// Admin document under construction.
    admins: Map<String, Value>,
    /// Skip writing the channel document so the store starts from a missing file.
    skip_channels: bool,
}

impl TestBuilder {
    /// Creates a builder with an empty channel document and nobody on the allow-list.
    pub fn new() -> Self {
        let mut channels = Map::new();
        channels.insert("types".to_string(), json!([]));

        let mut admins = Map::new();
        admins.insert("bot_owner".to_string(), json!([]));
        admins.insert("admins".to_string(), json!([]));

        Self {
            channels,
            admins,
            skip_channels: false,
        }
    }

    /// Registers a template base channel.
    ///
    /// # Arguments
    /// - `base_id` - Base voice channel id
    /// - `category_id` - Category temporary rooms are created in
    /// - `name_template` - Room name template, `{user}` is replaced by the owner's name
    /// - `slots` - User limit, 0 for unlimited
    /// - `locked` - Whether rooms are private and get a control panel
    pub fn with_template_base(
        mut self,
        base_id: u64,
        category_id: u64,
        name_template: &str,
        slots: u32,
        locked: bool,
    ) -> Self {
        self.object("voice_base_configs").insert(
            base_id.to_string(),
            fixture::base_channel_config(category_id, name_template, slots, locked),
        );
        self
    }

    /// Registers the custom base channel of a category.
    pub fn with_custom_base(mut self, category_id: u64, base_id: u64) -> Self {
        self.object("voice_custom_base").insert(
            category_id.to_string(),
            fixture::custom_base_config(category_id, base_id),
        );
        self
    }

    /// Marks a voice channel as temporary, as left behind by a previous run.
    pub fn with_temporary_channel(mut self, channel_id: u64) -> Self {
        let entry = self
            .channels
            .entry("voice_temporary".to_string())
            .or_insert_with(|| json!([]));
        if let Value::Array(ids) = entry {
            ids.push(json!(channel_id));
        }
        self
    }

    /// Records the panel channel of a temporary voice channel.
    pub fn with_temporary_panel(mut self, voice_channel_id: u64, text_channel_id: u64) -> Self {
        self.object("voice_temporary_panels")
            .insert(voice_channel_id.to_string(), json!(text_channel_id));
        self
    }

    /// Assigns a text channel to a type such as `welcome`.
    pub fn with_text_channel(mut self, kind: &str, channel_id: u64) -> Self {
        self.channels.insert(kind.to_string(), json!(channel_id));
        if let Some(Value::Array(types)) = self.channels.get_mut("types") {
            types.push(json!(kind));
        }
        self
    }

    /// Sets a single bot owner id.
    pub fn with_bot_owner(mut self, user_id: u64) -> Self {
        self.admins
            .insert("bot_owner".to_string(), json!(user_id));
        self
    }

    /// Adds an admin to the allow-list.
    pub fn with_admin(mut self, user_id: u64) -> Self {
        if let Some(Value::Array(admins)) = self.admins.get_mut("admins") {
            admins.push(json!(user_id));
        }
        self
    }

    /// Leaves the channel document unwritten so the store starts from a missing file.
    pub fn without_channel_document(mut self) -> Self {
        self.skip_channels = true;
        self
    }

    /// Writes the documents into a new temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning the directory
    /// - `Err(TestError)` - Directory or files could not be created
    pub fn build(self) -> Result<TestContext, TestError> {
        let dir = tempfile::tempdir()?;

        if !self.skip_channels {
            std::fs::write(
                dir.path().join(CHANNELS_FILE),
                serde_json::to_vec_pretty(&Value::Object(self.channels))?,
            )?;
        }
        std::fs::write(
            dir.path().join(ADMINS_FILE),
            serde_json::to_vec_pretty(&Value::Object(self.admins))?,
        )?;

        Ok(TestContext::new(dir))
    }

    fn object(&mut self, key: &str) -> &mut Map<String, Value> {
        let entry = self
            .channels
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just replaced by an object"),
        }
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
