use super::*;

/// Tests the owner leaving a locked room.
///
/// Expected: voice and panel channels deleted, registry and temporary set emptied
#[tokio::test]
async fn last_member_leaving_deletes_room_and_panel() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    let owner = enter_base(&state, &platform, BASE_ID).await;

    platform.leave(OWNER_ID);
    RoomLifecycleService::new(&state, &platform)
        .handle_presence_change(moved(&owner, Some(FIRST_CREATED), None))
        .await
        .unwrap();

    assert_eq!(platform.deletes(), vec![FIRST_CREATED, SECOND_CREATED]);
    assert!(!platform.exists(FIRST_CREATED));
    assert!(!platform.exists(SECOND_CREATED));
    assert!(state.rooms.read().await.is_empty());

    let raw = test.read_channels()?;
    assert_eq!(raw["voice_temporary"], serde_json::json!([]));
    assert_eq!(raw["voice_temporary_panels"], serde_json::json!({}));
    Ok(())
}

/// Tests a member leaving while someone else is still connected.
///
/// Expected: nothing deleted
#[tokio::test]
async fn occupied_room_survives() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, false)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    let owner = enter_base(&state, &platform, BASE_ID).await;
    platform.add_member(GUEST_ID, "B");
    platform.join(GUEST_ID, FIRST_CREATED);

    platform.leave(OWNER_ID);
    RoomLifecycleService::new(&state, &platform)
        .handle_presence_change(moved(&owner, Some(FIRST_CREATED), None))
        .await
        .unwrap();

    assert!(platform.deletes().is_empty());
    assert!(state.rooms.read().await.contains(FIRST_CREATED));
    Ok(())
}

/// Tests the owner hopping from their room straight back into the base channel.
///
/// Verifies the entry side provisions a second room and the exit side still tears the
/// first one down, exactly once.
///
/// Expected: first room's channels deleted once, second room live with the owner in it
#[tokio::test]
async fn reentering_base_replaces_room() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    let owner = enter_base(&state, &platform, BASE_ID).await;

    platform.join(OWNER_ID, BASE_ID);
    RoomLifecycleService::new(&state, &platform)
        .handle_presence_change(moved(&owner, Some(FIRST_CREATED), Some(BASE_ID)))
        .await
        .unwrap();

    assert_eq!(platform.deletes(), vec![FIRST_CREATED, SECOND_CREATED]);
    assert_eq!(platform.location(OWNER_ID), Some(THIRD_CREATED));

    let registry = state.rooms.read().await;
    assert_eq!(registry.keys(), vec![THIRD_CREATED]);
    Ok(())
}

/// Tests two members leaving the same room with their events handled concurrently.
///
/// Both handlers observe an empty room before either deletes it; the teardown lock and
/// re-check let only one of them proceed.
///
/// Expected: each channel deleted exactly once
#[tokio::test]
async fn concurrent_leaves_tear_down_once() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    let owner = enter_base(&state, &platform, BASE_ID).await;
    let guest = platform.add_member(GUEST_ID, "B");
    platform.join(GUEST_ID, FIRST_CREATED);

    platform.leave(OWNER_ID);
    platform.leave(GUEST_ID);

    let lifecycle = RoomLifecycleService::new(&state, &platform);
    let (first, second) = tokio::join!(
        lifecycle.handle_presence_change(moved(&owner, Some(FIRST_CREATED), None)),
        lifecycle.handle_presence_change(moved(&guest, Some(FIRST_CREATED), None)),
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(platform.deletes(), vec![FIRST_CREATED, SECOND_CREATED]);
    assert!(state.rooms.read().await.is_empty());
    Ok(())
}

/// Tests direct concurrent teardown requests for the same channel.
///
/// Expected: exactly one call reports the removal
#[tokio::test]
async fn concurrent_teardowns_report_single_removal() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, false)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    enter_base(&state, &platform, BASE_ID).await;
    platform.leave(OWNER_ID);

    let lifecycle = RoomLifecycleService::new(&state, &platform);
    let (first, second) = tokio::join!(
        lifecycle.teardown_if_empty(FIRST_CREATED, "test"),
        lifecycle.teardown_if_empty(FIRST_CREATED, "test"),
    );

    assert!(first.unwrap() ^ second.unwrap());
    assert_eq!(platform.deletes(), vec![FIRST_CREATED]);
    Ok(())
}

/// Tests a member joining while a teardown waits for the lock.
///
/// Expected: teardown aborts after its re-check, room kept
#[tokio::test]
async fn join_before_lock_acquired_aborts_teardown() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, false)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    enter_base(&state, &platform, BASE_ID).await;
    platform.add_member(GUEST_ID, "B");
    platform.leave(OWNER_ID);

    let lifecycle = RoomLifecycleService::new(&state, &platform);
    let guard = state.rooms.lock_teardown().await;

    let (removed, ()) = tokio::join!(
        lifecycle.teardown_if_empty(FIRST_CREATED, "test"),
        async {
            tokio::task::yield_now().await;
            platform.join(GUEST_ID, FIRST_CREATED);
            drop(guard);
        },
    );

    assert!(!removed.unwrap());
    assert!(platform.deletes().is_empty());
    assert!(state.rooms.read().await.contains(FIRST_CREATED));
    Ok(())
}

/// Tests leaving a channel the bot does not manage.
///
/// Expected: Ok(false), no platform calls
#[tokio::test]
async fn ignores_untracked_channels() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    platform.add_voice(OTHER_ID, "General", None);

    let removed = RoomLifecycleService::new(&state, &platform)
        .teardown_if_empty(OTHER_ID, "test")
        .await
        .unwrap();

    assert!(!removed);
    assert!(platform.calls().is_empty());
    assert!(platform.exists(OTHER_ID));
    Ok(())
}

/// Tests a room whose voice channel was already deleted by someone else.
///
/// Expected: Ok(true), panel still deleted and every record erased
#[tokio::test]
async fn delete_failure_still_forgets_room() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    enter_base(&state, &platform, BASE_ID).await;
    platform.remove_channel(FIRST_CREATED);

    let removed = RoomLifecycleService::new(&state, &platform)
        .teardown_if_empty(FIRST_CREATED, "test")
        .await
        .unwrap();

    assert!(removed);
    assert!(!platform.exists(SECOND_CREATED));
    assert!(state.rooms.read().await.is_empty());
    assert_eq!(test.read_channels()?["voice_temporary"], serde_json::json!([]));
    Ok(())
}

/// Tests tearing down a channel left from a previous run, known only from the document.
///
/// Expected: voice and recorded panel deleted
#[tokio::test]
async fn tears_down_persisted_channel_without_registry_entry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_temporary_channel(500)
        .with_temporary_panel(500, 501)
        .build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();
    platform.add_voice(500, "Old room", None);
    platform.add_channel(501, "panel-old", ChannelKind::Text, None);

    let removed = RoomLifecycleService::new(&state, &platform)
        .teardown_if_empty(500, "test")
        .await
        .unwrap();

    assert!(removed);
    assert_eq!(platform.deletes(), vec![500, 501]);
    assert_eq!(test.read_channels()?["voice_temporary"], serde_json::json!([]));
    Ok(())
}
