use super::*;

/// Tests inviting a guest, the owner and the same guest twice in one selection.
///
/// Expected: only the guest invited, with voice access and read-only panel access
#[tokio::test]
async fn invites_guest_once_and_skips_owner() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;

    let outcome = ControlPanelService::new(&state, &platform)
        .dispatch(
            OWNER_ID,
            SECOND_CREATED,
            PanelAction::Invite(vec![GUEST_ID, OWNER_ID, GUEST_ID]),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PanelOutcome::Invited {
            guests: vec![GUEST_ID]
        }
    );
    assert_eq!(
        overwrite_on(&platform, FIRST_CREATED, OverwriteTarget::Member(GUEST_ID)),
        Some(Overwrite::voice_guest(GUEST_ID))
    );
    assert_eq!(
        overwrite_on(&platform, SECOND_CREATED, OverwriteTarget::Member(GUEST_ID)),
        Some(Overwrite::panel_reader(GUEST_ID))
    );

    let room = state.rooms.read().await.get(FIRST_CREATED).cloned().unwrap();
    assert!(room.invited_guests.contains(&GUEST_ID));
    assert!(!room.invited_guests.contains(&OWNER_ID));
    Ok(())
}

/// Tests inviting only the owner.
///
/// Expected: empty invitation, no overwrite written
#[tokio::test]
async fn inviting_only_owner_is_noop() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;
    let calls_before = platform.calls().len();

    let outcome = ControlPanelService::new(&state, &platform)
        .dispatch(OWNER_ID, SECOND_CREATED, PanelAction::Invite(vec![OWNER_ID]))
        .await
        .unwrap();

    assert_eq!(outcome, PanelOutcome::Invited { guests: Vec::new() });
    assert_eq!(platform.calls().len(), calls_before);
    Ok(())
}
