use super::*;

/// Tests entering a locked template base.
///
/// Verifies the voice room is named from the template, limited to the configured slots and
/// hidden from everyone, and that the owner gets a read-only panel channel.
///
/// Expected: owner moved into the new room, both channels persisted as temporary
#[tokio::test]
async fn provisions_locked_room_with_panel() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();

    enter_base(&state, &platform, BASE_ID).await;

    let voice = platform.get(FIRST_CREATED).unwrap();
    assert_eq!(voice.name, "Room of A");
    assert_eq!(voice.kind, ChannelKind::Voice);
    assert_eq!(voice.user_limit, 2);
    assert_eq!(voice.parent_id, Some(CATEGORY_ID));
    assert!(voice.overwrites.contains(&Overwrite::voice_default(true)));
    assert!(voice.overwrites.contains(&Overwrite::voice_guest(OWNER_ID)));

    let panel = platform.get(SECOND_CREATED).unwrap();
    assert_eq!(panel.name, "panel-a");
    assert_eq!(panel.kind, ChannelKind::Text);
    let reader =
        overwrite_on(&platform, SECOND_CREATED, OverwriteTarget::Member(OWNER_ID)).unwrap();
    assert!(reader.allow.contains(Permissions::VIEW_CHANNEL));
    assert!(reader.deny.contains(Permissions::SEND_MESSAGES));

    assert_eq!(platform.location(OWNER_ID), Some(FIRST_CREATED));

    let sent = platform.panels();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, SECOND_CREATED);
    assert_eq!(sent[0].1.name, "Room of A");

    let room = state.rooms.read().await.get(FIRST_CREATED).cloned().unwrap();
    assert_eq!(room.owner_id, OWNER_ID);
    assert_eq!(room.kind, RoomKind::Template);
    assert_eq!(room.text_channel_id, Some(SECOND_CREATED));
    assert!(room.locked);

    let raw = test.read_channels()?;
    assert_eq!(raw["voice_temporary"], serde_json::json!([FIRST_CREATED]));
    assert_eq!(
        raw["voice_temporary_panels"][FIRST_CREATED.to_string()],
        SECOND_CREATED
    );
    Ok(())
}

/// Tests entering an unlocked template base.
///
/// Expected: a single voice channel without overwrites and no panel
#[tokio::test]
async fn unlocked_room_has_no_panel() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 0, false)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();

    enter_base(&state, &platform, BASE_ID).await;

    let created = platform.created();
    assert_eq!(created.len(), 1);
    assert!(created[0].1.overwrites.is_empty());
    assert!(platform.panels().is_empty());
    assert_eq!(platform.location(OWNER_ID), Some(FIRST_CREATED));
    Ok(())
}

/// Tests a base config with a blank template.
///
/// Expected: room named after the base channel with the placeholder substituted
#[tokio::test]
async fn blank_template_falls_back_to_base_name() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "  ", 0, false)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    platform.add_voice(BASE_ID, "{user}'s lair", Some(CATEGORY_ID));

    enter_base(&state, &platform, BASE_ID).await;

    assert_eq!(platform.get(FIRST_CREATED).unwrap().name, "A's lair");
    Ok(())
}

/// Tests a base config with a slot count above Discord's limit.
///
/// Expected: user limit clamped to 99
#[tokio::test]
async fn clamps_slot_limit() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "{user}", 500, false)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();

    enter_base(&state, &platform, BASE_ID).await;

    assert_eq!(platform.get(FIRST_CREATED).unwrap().user_limit, 99);
    Ok(())
}

/// Tests the platform refusing to create the voice channel.
///
/// Expected: Ok, nothing registered or persisted, member left in the base channel
#[tokio::test]
async fn create_failure_leaves_member_in_base() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    platform.fail_create(true);

    enter_base(&state, &platform, BASE_ID).await;

    assert!(state.rooms.read().await.is_empty());
    assert_eq!(platform.location(OWNER_ID), Some(BASE_ID));
    assert!(persisted(&test)?.temporary_channels.is_empty());
    Ok(())
}

/// Tests presence updates from bot accounts.
///
/// Expected: no platform calls at all
#[tokio::test]
async fn ignores_bots() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    platform.add_voice(BASE_ID, "Create a room", Some(CATEGORY_ID));

    let mut bot = platform.add_member(OTHER_ID, "music");
    bot.bot = true;

    RoomLifecycleService::new(&state, &platform)
        .handle_presence_change(moved(&bot, None, Some(BASE_ID)))
        .await
        .unwrap();

    assert!(platform.calls().is_empty());
    Ok(())
}

/// Tests a presence update that does not change channel, such as a self-mute.
///
/// Expected: no platform calls
#[tokio::test]
async fn ignores_updates_within_same_channel() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    platform.add_voice(BASE_ID, "Create a room", Some(CATEGORY_ID));
    let member = platform.add_member(OWNER_ID, "A");

    RoomLifecycleService::new(&state, &platform)
        .handle_presence_change(moved(&member, Some(BASE_ID), Some(BASE_ID)))
        .await
        .unwrap();

    assert!(platform.calls().is_empty());
    Ok(())
}

/// Tests the owner disconnecting before the move into the new room.
///
/// Expected: the freshly created room is torn down again
#[tokio::test]
async fn move_failure_tears_room_down() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    platform.fail_move(true);

    enter_base(&state, &platform, BASE_ID).await;

    assert_eq!(platform.deletes(), vec![FIRST_CREATED, SECOND_CREATED]);
    assert!(state.rooms.read().await.is_empty());
    assert!(persisted(&test)?.temporary_channels.is_empty());
    Ok(())
}
