//! JSON fragments matching the bot's on-disk document layout.

use serde_json::{json, Value};

/// Template base channel entry of `voice_base_configs`.
pub fn base_channel_config(category_id: u64, name_template: &str, slots: u32, locked: bool) -> Value {
    json!({
        "category": category_id,
        "temp_name": name_template,
        "slots": slots,
        "locked": locked,
    })
}

/// Custom base entry of `voice_custom_base`.
pub fn custom_base_config(category_id: u64, base_id: u64) -> Value {
    json!({
        "base_id": base_id,
        "category": category_id,
    })
}
