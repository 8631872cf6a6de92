use super::*;

/// Tests muting an invited guest together with someone never invited.
///
/// Expected: only the invited guest muted and reported
#[tokio::test]
async fn mutes_invited_guests_only() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;
    invite_guest(&state, &platform).await;
    platform.add_member(OTHER_ID, "C");

    let outcome = ControlPanelService::new(&state, &platform)
        .dispatch(
            OWNER_ID,
            SECOND_CREATED,
            PanelAction::GuestAction {
                action: GuestAction::Mute,
                targets: vec![GUEST_ID, OTHER_ID],
            },
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PanelOutcome::GuestsAffected {
            action: GuestAction::Mute,
            members: vec![GUEST_ID],
        }
    );
    let edits: Vec<Call> = platform
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::EditVoiceState { .. }))
        .collect();
    assert_eq!(
        edits,
        vec![Call::EditVoiceState {
            user_id: GUEST_ID,
            edit: VoiceStateEdit {
                mute: Some(true),
                deafen: None,
            },
        }]
    );
    Ok(())
}

/// Tests kicking a connected guest, then acting on them again.
///
/// Expected: guest disconnected and stripped of access; the follow-up affects nobody
#[tokio::test]
async fn kicked_guest_is_no_longer_targetable() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;
    invite_guest(&state, &platform).await;
    platform.join(GUEST_ID, FIRST_CREATED);
    let panel = ControlPanelService::new(&state, &platform);

    let outcome = panel
        .dispatch(
            OWNER_ID,
            SECOND_CREATED,
            PanelAction::GuestAction {
                action: GuestAction::Kick,
                targets: vec![GUEST_ID],
            },
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PanelOutcome::GuestsAffected {
            action: GuestAction::Kick,
            members: vec![GUEST_ID],
        }
    );
    assert_eq!(platform.location(GUEST_ID), None);
    assert_eq!(
        overwrite_on(&platform, FIRST_CREATED, OverwriteTarget::Member(GUEST_ID)),
        None
    );
    assert_eq!(
        overwrite_on(&platform, SECOND_CREATED, OverwriteTarget::Member(GUEST_ID)),
        None
    );
    assert!(state
        .rooms
        .read()
        .await
        .get(FIRST_CREATED)
        .unwrap()
        .invited_guests
        .is_empty());

    let outcome = panel
        .dispatch(
            OWNER_ID,
            SECOND_CREATED,
            PanelAction::GuestAction {
                action: GuestAction::Deafen,
                targets: vec![GUEST_ID],
            },
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PanelOutcome::GuestsAffected {
            action: GuestAction::Deafen,
            members: Vec::new(),
        }
    );
    Ok(())
}

/// Tests a guest who left the guild after being invited.
///
/// Expected: skipped without a platform call
#[tokio::test]
async fn skips_guests_that_left_guild() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;
    state
        .rooms
        .write()
        .await
        .get_mut(FIRST_CREATED)
        .unwrap()
        .invited_guests
        .insert(OTHER_ID);

    let outcome = ControlPanelService::new(&state, &platform)
        .dispatch(
            OWNER_ID,
            SECOND_CREATED,
            PanelAction::GuestAction {
                action: GuestAction::Unmute,
                targets: vec![OTHER_ID],
            },
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PanelOutcome::GuestsAffected {
            action: GuestAction::Unmute,
            members: Vec::new(),
        }
    );
    assert!(!platform
        .calls()
        .iter()
        .any(|call| matches!(call, Call::EditVoiceState { .. })));
    Ok(())
}

/// Tests a guest action without targets.
///
/// Expected: Err(NoGuestsSelected)
#[tokio::test]
async fn rejects_empty_selection() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;

    let result = ControlPanelService::new(&state, &platform)
        .dispatch(
            OWNER_ID,
            SECOND_CREATED,
            PanelAction::GuestAction {
                action: GuestAction::Mute,
                targets: Vec::new(),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::RoomErr(RoomError::NoGuestsSelected))
    ));
    Ok(())
}
