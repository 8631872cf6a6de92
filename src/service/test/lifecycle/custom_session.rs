use super::*;

/// Tests entering a custom base channel.
///
/// Expected: a panel channel and a provisional room keyed by it, no voice channel yet
#[tokio::test]
async fn opens_session_with_panel_only() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_custom_base(CATEGORY_ID, CUSTOM_BASE_ID)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();

    enter_base(&state, &platform, CUSTOM_BASE_ID).await;

    let created = platform.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].1.name, "voice-config-a");
    assert_eq!(created[0].1.kind, ChannelKind::Text);
    assert_eq!(created[0].1.parent_id, Some(CATEGORY_ID));

    let room = state.rooms.read().await.get(FIRST_CREATED).cloned().unwrap();
    assert_eq!(room.kind, RoomKind::Custom);
    assert_eq!(room.voice_channel_id, None);
    assert_eq!(room.text_channel_id, Some(FIRST_CREATED));

    assert_eq!(platform.panels().len(), 1);
    assert_eq!(platform.location(OWNER_ID), Some(CUSTOM_BASE_ID));
    Ok(())
}

/// Tests an owner opening a second custom session.
///
/// Expected: the first session's panel deleted, only the new session registered
#[tokio::test]
async fn new_session_supersedes_previous() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_custom_base(CATEGORY_ID, CUSTOM_BASE_ID)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    let owner = enter_base(&state, &platform, CUSTOM_BASE_ID).await;

    platform.leave(OWNER_ID);
    let lifecycle = RoomLifecycleService::new(&state, &platform);
    lifecycle
        .handle_presence_change(moved(&owner, Some(CUSTOM_BASE_ID), None))
        .await
        .unwrap();
    platform.join(OWNER_ID, CUSTOM_BASE_ID);
    lifecycle
        .handle_presence_change(moved(&owner, None, Some(CUSTOM_BASE_ID)))
        .await
        .unwrap();

    assert_eq!(platform.deletes(), vec![FIRST_CREATED]);
    assert_eq!(state.rooms.read().await.keys(), vec![SECOND_CREATED]);
    assert!(platform.exists(CUSTOM_BASE_ID));
    Ok(())
}

/// Tests the same owner entering the custom base twice at once.
///
/// Verifies the two sessions open one after the other, so the later one supersedes the
/// earlier instead of both staying registered.
///
/// Expected: one session registered, the other session's panel deleted
#[tokio::test]
async fn concurrent_entries_open_one_session() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_custom_base(CATEGORY_ID, CUSTOM_BASE_ID)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    let owner = platform.add_member(OWNER_ID, "A");
    let lifecycle = RoomLifecycleService::new(&state, &platform);

    let (first, second) = tokio::join!(
        lifecycle.start_custom_session(&owner, CATEGORY_ID),
        lifecycle.start_custom_session(&owner, CATEGORY_ID),
    );
    let opened = [first.unwrap().unwrap(), second.unwrap().unwrap()];

    let keys = state.rooms.read().await.keys();
    assert_eq!(keys.len(), 1);
    assert!(opened.contains(&keys[0]));
    assert!(platform.exists(keys[0]));

    let superseded = opened.iter().copied().find(|id| *id != keys[0]).unwrap();
    assert_eq!(platform.deletes(), vec![superseded]);
    assert!(!platform.exists(superseded));
    Ok(())
}
