use super::*;

/// Tests unlocking and relocking a template room.
///
/// Expected: default access overwrite follows the lock state each time
#[tokio::test]
async fn toggles_default_access() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;
    let panel = ControlPanelService::new(&state, &platform);

    let outcome = panel
        .dispatch(OWNER_ID, SECOND_CREATED, PanelAction::ToggleLock)
        .await
        .unwrap();

    assert_eq!(outcome, PanelOutcome::LockToggled { locked: false });
    assert_eq!(
        overwrite_on(&platform, FIRST_CREATED, OverwriteTarget::Everyone),
        Some(Overwrite::voice_default(false))
    );
    assert!(!state.rooms.read().await.get(FIRST_CREATED).unwrap().locked);

    let outcome = panel
        .dispatch(OWNER_ID, SECOND_CREATED, PanelAction::ToggleLock)
        .await
        .unwrap();

    assert_eq!(outcome, PanelOutcome::LockToggled { locked: true });
    assert_eq!(
        overwrite_on(&platform, FIRST_CREATED, OverwriteTarget::Everyone),
        Some(Overwrite::voice_default(true))
    );
    Ok(())
}

/// Tests locking a custom session before its voice channel exists.
///
/// Expected: state recorded without touching the platform
#[tokio::test]
async fn custom_session_without_voice_only_records_lock() -> Result<(), TestError> {
    let test = custom_base().build()?;
    let (state, platform) = custom_session(&test).await;
    let calls_before = platform.calls().len();

    let outcome = ControlPanelService::new(&state, &platform)
        .dispatch(OWNER_ID, FIRST_CREATED, PanelAction::ToggleLock)
        .await
        .unwrap();

    assert_eq!(outcome, PanelOutcome::LockToggled { locked: true });
    assert_eq!(platform.calls().len(), calls_before);
    assert!(state.rooms.read().await.get(FIRST_CREATED).unwrap().locked);
    Ok(())
}
