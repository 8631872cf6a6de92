use std::time::Duration;

use serenity::all::Permissions;
use test_utils::{builder::TestBuilder, context::TestContext, error::TestError};

use crate::{
    config::OrphanPolicy,
    error::{auth::AuthError, room::RoomError, AppError},
    model::{
        channel::{ChannelKind, Overwrite, OverwriteTarget, VoiceStateEdit},
        document::{BaseChannel, ChannelsDocument},
        panel::{GuestAction, PanelAction, PanelOutcome, RoomSettings},
        presence::{PresenceChange, VoiceMember},
        room::RoomKind,
    },
    platform::mock::{Call, MockPlatform},
    service::{
        lifecycle::RoomLifecycleService,
        panel::ControlPanelService,
        permission::PermissionService,
        reconcile::{ReconcileReport, ReconcileService},
        text_channel::TextChannelService,
        voice_builder::{TemplateBaseParams, VoiceBuilderService},
        welcome::WelcomeService,
    },
    state::BotState,
};

mod panel;

const CATEGORY_ID: u64 = 5;
const BASE_ID: u64 = 20;
const CUSTOM_BASE_ID: u64 = 21;
const OWNER_ID: u64 = 100;
const GUEST_ID: u64 = 200;
const OTHER_ID: u64 = 300;

/// Channel ids the mock hands out, in creation order.
const FIRST_CREATED: u64 = 1_000;
const SECOND_CREATED: u64 = 1_001;
const THIRD_CREATED: u64 = 1_002;

fn state_for(test: &TestContext) -> BotState {
    BotState::new(
        test.channels_path(),
        test.admins_path(),
        OrphanPolicy::Ignore,
        Duration::from_secs(35),
    )
}

fn moved(member: &VoiceMember, previous: Option<u64>, next: Option<u64>) -> PresenceChange {
    PresenceChange {
        member: member.clone(),
        previous_channel: previous,
        next_channel: next,
    }
}

/// Seeds the mock with the base channel and owner, then walks the owner into the base.
///
/// With a locked template base the room gets voice `FIRST_CREATED` and panel
/// `SECOND_CREATED`.
async fn enter_base(state: &BotState, platform: &MockPlatform, base_id: u64) -> VoiceMember {
    if !platform.exists(base_id) {
        platform.add_voice(base_id, "Create a room", Some(CATEGORY_ID));
    }
    let owner = platform.add_member(OWNER_ID, "A");
    platform.join(OWNER_ID, base_id);

    RoomLifecycleService::new(state, platform)
        .handle_presence_change(moved(&owner, None, Some(base_id)))
        .await
        .unwrap();

    owner
}

/// Channel document as persisted, with missing keys defaulted the way the bot reads them.
fn persisted(test: &TestContext) -> Result<ChannelsDocument, TestError> {
    Ok(serde_json::from_value(test.read_channels()?)?)
}

/// Overwrite of `target` on a mock channel.
fn overwrite_on(
    platform: &MockPlatform,
    channel_id: u64,
    target: OverwriteTarget,
) -> Option<Overwrite> {
    platform
        .get(channel_id)?
        .overwrites
        .into_iter()
        .find(|overwrite| overwrite.target == target)
}
