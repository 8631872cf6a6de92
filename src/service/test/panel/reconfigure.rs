use super::*;

fn settings(name: &str, slots: u32) -> RoomSettings {
    RoomSettings {
        name_template: Some(name.to_string()),
        slot_limit: Some(slots),
        locked: None,
    }
}

/// Tests the first configuration of a custom session that was locked beforehand.
///
/// Verifies the lock recorded without a voice channel is applied when the channel is
/// created, and the room moves from its provisional key to the voice channel id.
///
/// Expected: voice channel created with the deny overwrite, owner moved in, room re-keyed
#[tokio::test]
async fn first_configuration_creates_locked_voice_channel() -> Result<(), TestError> {
    let test = custom_base().build()?;
    let (state, platform) = custom_session(&test).await;
    let panel = ControlPanelService::new(&state, &platform);

    panel
        .dispatch(OWNER_ID, FIRST_CREATED, PanelAction::ToggleLock)
        .await
        .unwrap();
    let outcome = panel
        .dispatch(
            OWNER_ID,
            FIRST_CREATED,
            PanelAction::Reconfigure(settings("Den of {user}", 3)),
        )
        .await
        .unwrap();

    assert_eq!(outcome, PanelOutcome::Reconfigured { created: true });

    let voice = platform.get(SECOND_CREATED).unwrap();
    assert_eq!(voice.name, "Den of A");
    assert_eq!(voice.kind, ChannelKind::Voice);
    assert_eq!(voice.user_limit, 3);
    assert_eq!(voice.parent_id, Some(CATEGORY_ID));
    assert!(voice.overwrites.contains(&Overwrite::voice_default(true)));
    assert!(voice.overwrites.contains(&Overwrite::voice_guest(OWNER_ID)));
    assert_eq!(platform.location(OWNER_ID), Some(SECOND_CREATED));

    let registry = state.rooms.read().await;
    assert!(!registry.contains(FIRST_CREATED));
    let room = registry.get(SECOND_CREATED).unwrap();
    assert_eq!(room.text_channel_id, Some(FIRST_CREATED));
    assert_eq!(room.name_template, "Den of {user}");
    assert_eq!(
        registry.find_by_text_channel(FIRST_CREATED).map(|room| room.key()),
        Some(SECOND_CREATED)
    );
    drop(registry);

    let raw = test.read_channels()?;
    assert_eq!(raw["voice_temporary"], serde_json::json!([SECOND_CREATED]));
    assert_eq!(
        raw["voice_temporary_panels"][SECOND_CREATED.to_string()],
        FIRST_CREATED
    );
    Ok(())
}

/// Tests reconfiguring a custom room whose voice channel already exists.
///
/// Expected: channel edited in place, no new channel created
#[tokio::test]
async fn later_configuration_edits_existing_channel() -> Result<(), TestError> {
    let test = custom_base().build()?;
    let (state, platform) = custom_session(&test).await;
    let panel = ControlPanelService::new(&state, &platform);

    panel
        .dispatch(
            OWNER_ID,
            FIRST_CREATED,
            PanelAction::Reconfigure(settings("Den of {user}", 3)),
        )
        .await
        .unwrap();
    let outcome = panel
        .dispatch(
            OWNER_ID,
            FIRST_CREATED,
            PanelAction::Reconfigure(settings("Cave of {user}", 5)),
        )
        .await
        .unwrap();

    assert_eq!(outcome, PanelOutcome::Reconfigured { created: false });
    assert_eq!(platform.created().len(), 2);

    let voice = platform.get(SECOND_CREATED).unwrap();
    assert_eq!(voice.name, "Cave of A");
    assert_eq!(voice.user_limit, 5);
    assert!(!voice.overwrites.contains(&Overwrite::voice_default(true)));
    assert_eq!(
        state.rooms.read().await.get(SECOND_CREATED).unwrap().slot_limit,
        5
    );
    Ok(())
}

/// Tests reconfiguring a template room.
///
/// Expected: Err(NotCustomRoom)
#[tokio::test]
async fn rejects_template_room() -> Result<(), TestError> {
    let test = locked_template().build()?;
    let (state, platform) = locked_room(&test).await;

    let result = ControlPanelService::new(&state, &platform)
        .dispatch(
            OWNER_ID,
            SECOND_CREATED,
            PanelAction::Reconfigure(settings("x", 1)),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::RoomErr(RoomError::NotCustomRoom { .. }))
    ));
    Ok(())
}

/// Tests the platform refusing the voice channel of a custom room.
///
/// Expected: Err(ChannelUnavailable), session still provisional and usable
#[tokio::test]
async fn create_failure_keeps_provisional_session() -> Result<(), TestError> {
    let test = custom_base().build()?;
    let (state, platform) = custom_session(&test).await;
    platform.fail_create(true);

    let result = ControlPanelService::new(&state, &platform)
        .dispatch(
            OWNER_ID,
            FIRST_CREATED,
            PanelAction::Reconfigure(settings("Den of {user}", 3)),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::RoomErr(RoomError::ChannelUnavailable {
            room_key: FIRST_CREATED
        }))
    ));
    let room = state.rooms.read().await.get(FIRST_CREATED).cloned().unwrap();
    assert_eq!(room.voice_channel_id, None);
    assert!(persisted(&test)?.temporary_channels.is_empty());
    Ok(())
}

/// Tests two configuration submissions for a provisional session arriving together.
///
/// Verifies only one voice channel is created; the later submission edits it in place.
///
/// Expected: one created and one edited outcome, a single room and temporary channel
#[tokio::test]
async fn concurrent_first_configurations_create_one_channel() -> Result<(), TestError> {
    let test = custom_base().build()?;
    let (state, platform) = custom_session(&test).await;
    let panel = ControlPanelService::new(&state, &platform);

    let (first, second) = tokio::join!(
        panel.dispatch(
            OWNER_ID,
            FIRST_CREATED,
            PanelAction::Reconfigure(settings("Den of {user}", 3)),
        ),
        panel.dispatch(
            OWNER_ID,
            FIRST_CREATED,
            PanelAction::Reconfigure(settings("Cave of {user}", 5)),
        ),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    assert!(outcomes.contains(&PanelOutcome::Reconfigured { created: true }));
    assert!(outcomes.contains(&PanelOutcome::Reconfigured { created: false }));
    assert_eq!(platform.created().len(), 2);
    assert_eq!(state.rooms.read().await.keys(), vec![SECOND_CREATED]);
    assert_eq!(persisted(&test)?.temporary_channels, vec![SECOND_CREATED]);
    assert_eq!(platform.location(OWNER_ID), Some(SECOND_CREATED));
    Ok(())
}

/// Tests a configuration submission racing the owner closing the session.
///
/// Whichever runs first, the session must end fully closed: no voice channel left behind
/// and nothing left in the temporary set or its panel records.
///
/// Expected: Closed, no live channels, registry and document empty
#[tokio::test]
async fn configuration_racing_close_leaves_nothing_behind() -> Result<(), TestError> {
    let test = custom_base().build()?;
    let (state, platform) = custom_session(&test).await;
    let panel = ControlPanelService::new(&state, &platform);

    let (reconfigured, closed) = tokio::join!(
        panel.dispatch(
            OWNER_ID,
            FIRST_CREATED,
            PanelAction::Reconfigure(settings("Den of {user}", 3)),
        ),
        panel.dispatch(OWNER_ID, FIRST_CREATED, PanelAction::Close),
    );

    assert_eq!(closed.unwrap(), PanelOutcome::Closed);
    assert!(matches!(
        reconfigured,
        Ok(PanelOutcome::Reconfigured { created: true })
            | Err(AppError::RoomErr(RoomError::RoomNotFound { .. }))
    ));

    assert!(state.rooms.read().await.is_empty());
    for (id, _) in platform.created() {
        assert!(!platform.exists(id), "channel {} left behind", id);
    }
    let doc = persisted(&test)?;
    assert!(doc.temporary_channels.is_empty());
    assert!(doc.temporary_panels.is_empty());
    Ok(())
}
