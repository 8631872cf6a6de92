use super::*;

mod guest_action;
mod invite;
mod reconfigure;
mod toggle_lock;

/// Provisions a locked template room for the owner.
///
/// Voice channel `FIRST_CREATED`, panel `SECOND_CREATED`.
async fn locked_room(test: &TestContext) -> (BotState, MockPlatform) {
    let state = state_for(test);
    let platform = MockPlatform::new();
    enter_base(&state, &platform, BASE_ID).await;
    (state, platform)
}

/// Opens a custom session for the owner, keyed by panel `FIRST_CREATED`.
async fn custom_session(test: &TestContext) -> (BotState, MockPlatform) {
    let state = state_for(test);
    let platform = MockPlatform::new();
    enter_base(&state, &platform, CUSTOM_BASE_ID).await;
    (state, platform)
}

fn locked_template() -> TestBuilder {
    TestBuilder::new().with_template_base(BASE_ID, CATEGORY_ID, "Room of {user}", 2, true)
}

fn custom_base() -> TestBuilder {
    TestBuilder::new().with_custom_base(CATEGORY_ID, CUSTOM_BASE_ID)
}

/// Invites `GUEST_ID` into the locked room.
async fn invite_guest(state: &BotState, platform: &MockPlatform) {
    platform.add_member(GUEST_ID, "B");
    ControlPanelService::new(state, platform)
        .dispatch(OWNER_ID, SECOND_CREATED, PanelAction::Invite(vec![GUEST_ID]))
        .await
        .unwrap();
}

/// Tests a panel action from someone who is not the owner.
///
/// Expected: Err(NotRoomOwner) and no platform call
#[tokio::test]
async fn rejects_non_owner() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;
    let calls_before = platform.calls().len();

    let result = ControlPanelService::new(&state, &platform)
        .dispatch(OTHER_ID, SECOND_CREATED, PanelAction::ToggleLock)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotRoomOwner { actor_id: OTHER_ID }))
    ));
    assert_eq!(platform.calls().len(), calls_before);
    assert!(state.rooms.read().await.get(FIRST_CREATED).unwrap().locked);
    Ok(())
}

/// Tests a panel action from a channel that is not a room panel.
///
/// Expected: Err(RoomNotFound)
#[tokio::test]
async fn rejects_unknown_panel() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let state = state_for(&test);
    let platform = MockPlatform::new();

    let result = ControlPanelService::new(&state, &platform)
        .dispatch(OWNER_ID, 999, PanelAction::ToggleLock)
        .await;

    assert!(matches!(
        result,
        Err(AppError::RoomErr(RoomError::RoomNotFound { channel_id: 999 }))
    ));
    Ok(())
}
