//! Birthday registry and birthday list integration tests
//!
//! Run with: cargo test -p integration-tests --test birthday_tests

use dino_core::{DomainError, Embed, EmbedAnchor, Snowflake};
use dino_service::display::{BIRTHDAY_LIST_EMPTY, BIRTHDAY_LIST_TITLE};
use dino_service::{EditEmbedRequest, RenderOutcome, ServiceError};
use dino_store::Birthdays;
use integration_tests::*;

fn edit_request(message_id: &str, title: Option<&str>, description: Option<&str>) -> EditEmbedRequest {
    EditEmbedRequest {
        channel_id: GENERAL_CHANNEL,
        message_id: message_id.to_string(),
        title: title.map(str::to_string),
        description: description.map(str::to_string),
    }
}

// ============================================================================
// Registry
// ============================================================================

#[tokio::test]
async fn test_birthday_validation() {
    let harness = TestHarness::new();
    let birthdays = harness.birthdays();

    let err = birthdays.set_birthday(GUILD, ALICE, "13/01").await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidBirthday(_))));
    let err = birthdays.set_birthday(GUILD, ALICE, "02/30").await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidBirthday(_))));
    assert_eq!(err.user_message(), "Invalid date format. Please use MM/DD (e.g., 01/15).");
    assert!(birthdays.get_birthday(GUILD, ALICE).await.unwrap().is_none());

    let registered = birthdays.set_birthday(GUILD, ALICE, "03/25").await.unwrap();
    assert_eq!((registered.date.month(), registered.date.day()), (3, 25));
    assert_eq!(
        registered.message(),
        "Your birthday (03/25) has been added! The birthday list will be updated."
    );

    let stored = birthdays.get_birthday(GUILD, ALICE).await.unwrap().unwrap();
    assert_eq!(stored.birthday, "03/25");
}

#[tokio::test]
async fn test_leap_day_rejected() {
    let harness = TestHarness::new();

    let err = harness
        .birthdays()
        .set_birthday(GUILD, ALICE, "02/29")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidBirthday(_))));
}

#[tokio::test]
async fn test_birthday_is_write_once() {
    let harness = TestHarness::new();
    let birthdays = harness.birthdays();
    birthdays.set_birthday(GUILD, ALICE, "7/4").await.unwrap();

    let err = birthdays.set_birthday(GUILD, ALICE, "08/01").await.unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::BirthdayAlreadySet)));
    let stored = birthdays.get_birthday(GUILD, ALICE).await.unwrap().unwrap();
    assert_eq!(stored.birthday, "07/04");
}

#[tokio::test]
async fn test_register_without_channel_skips_render() {
    let harness = TestHarness::new();

    let registered = harness
        .birthdays()
        .set_birthday(GUILD, ALICE, "03/25")
        .await
        .unwrap();

    assert_eq!(registered.render, Some(RenderOutcome::NoChannel));
    assert!(harness.discord.sent().is_empty());
}

#[tokio::test]
async fn test_upcoming_orders_by_next_occurrence() {
    // 2024-03-25: today's birthday first, yesterday's last
    let harness = TestHarness::at(at(3, 25, 23));
    register_all(
        &harness,
        GUILD,
        &[(ALICE, "03/24"), (BOB, "12/31"), (CAROL, "03/25")],
    )
    .await;

    let upcoming = harness.birthdays().upcoming(GUILD).await.unwrap();
    let order: Vec<_> = upcoming.iter().map(|b| b.user_id).collect();
    assert_eq!(order, vec![CAROL, BOB, ALICE]);
    assert_eq!(upcoming[0].name, "carol");
}

#[tokio::test]
async fn test_prune_drops_departed_members() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "01/01"), (BOB, "02/02")]).await;
    harness.discord.kick_member(GUILD, BOB);

    let removed = harness.birthdays().prune_invalid_or_absent(GUILD).await.unwrap();

    assert_eq!(removed, vec![BOB]);
    let row = harness.birthday_row(GUILD).await;
    assert_eq!(row.users.len(), 1);
    assert_eq!(row.users[0].user_id, ALICE);
}

#[tokio::test]
async fn test_prune_keeps_unreachable_members() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "01/01"), (BOB, "02/02")]).await;
    harness.discord.make_member_unreachable(BOB);

    let removed = harness.birthdays().prune_invalid_or_absent(GUILD).await.unwrap();
    assert!(removed.is_empty());

    // Kept on disk but left off the list
    let upcoming = harness.birthdays().upcoming(GUILD).await.unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(harness.birthday_row(GUILD).await.users.len(), 2);
}

#[tokio::test]
async fn test_prune_drops_unparseable_records() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "01/01")]).await;
    harness
        .store
        .modify_row::<Birthdays, _, _>(GUILD, |row| {
            row.users.push(dino_core::BirthdayEntry {
                user_id: BOB,
                birthday: "soon".to_string(),
            });
        })
        .await
        .unwrap();

    let removed = harness.birthdays().prune_invalid_or_absent(GUILD).await.unwrap();

    assert_eq!(removed, vec![BOB]);
    assert!(harness.birthdays().get_birthday(GUILD, BOB).await.unwrap().is_none());
}

// ============================================================================
// Birthday list
// ============================================================================

#[tokio::test]
async fn test_set_channel_posts_list() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "04/01"), (BOB, "03/25")]).await;

    let outcome = harness
        .birthdays()
        .set_channel(GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap();

    let RenderOutcome::Sent { anchor, replaced } = outcome else {
        panic!("expected a new list message, got {outcome:?}");
    };
    assert!(replaced.is_none());
    assert_eq!(anchor.channel_id, BIRTHDAYS_CHANNEL);

    let message = harness.discord.message(anchor.message_id).unwrap();
    let embed = &message.embeds[0];
    assert_eq!(embed.title.as_deref(), Some(BIRTHDAY_LIST_TITLE));
    assert_eq!(embed_description(&message), "• **bob**: 03/25\n• **alice**: 04/01");

    let row = harness.birthday_row(GUILD).await;
    assert_eq!(row.birthday_channel_id, Some(BIRTHDAYS_CHANNEL));
    assert_eq!(row.embed_info, Some(anchor));
}

#[tokio::test]
async fn test_empty_list_renders_placeholder() {
    let harness = TestHarness::new();

    let outcome = harness
        .birthdays()
        .set_channel(GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap();

    let message = harness.discord.message(outcome.anchor().unwrap().message_id).unwrap();
    assert_eq!(embed_description(&message), BIRTHDAY_LIST_EMPTY);
}

#[tokio::test]
async fn test_repeated_renders_keep_one_message() {
    let harness = TestHarness::new();
    harness.birthdays().set_channel(GUILD, BIRTHDAYS_CHANNEL).await.unwrap();
    register_all(&harness, GUILD, &[(ALICE, "05/05"), (BOB, "06/06")]).await;

    let first = harness.embeds().render(GUILD).await.unwrap();
    let second = harness.embeds().render(GUILD).await.unwrap();

    assert!(matches!(first, RenderOutcome::Edited { .. }));
    assert_eq!(first, second);
    let messages = harness.discord.messages_in(BIRTHDAYS_CHANNEL);
    assert_eq!(messages.len(), 1);
    assert_eq!(embed_description(&messages[0]), "• **alice**: 05/05\n• **bob**: 06/06");
}

#[tokio::test]
async fn test_concurrent_renders_send_once() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "05/05")]).await;
    harness
        .store
        .modify_row::<Birthdays, _, _>(GUILD, |row| row.birthday_channel_id = Some(BIRTHDAYS_CHANNEL))
        .await
        .unwrap();

    let embeds = harness.embeds();
    let (a, b) = tokio::join!(embeds.render(GUILD), embeds.render(GUILD));
    a.unwrap();
    b.unwrap();

    assert_eq!(harness.discord.sent().len(), 1);
    assert_eq!(harness.discord.messages_in(BIRTHDAYS_CHANNEL).len(), 1);
}

#[tokio::test]
async fn test_deleted_list_message_is_replaced() {
    let harness = TestHarness::new();
    let first = harness
        .birthdays()
        .set_channel(GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap()
        .anchor()
        .unwrap();
    harness.discord.delete_message(first.message_id);

    let outcome = harness.embeds().render(GUILD).await.unwrap();

    let RenderOutcome::Sent { anchor, replaced } = outcome else {
        panic!("expected a replacement message, got {outcome:?}");
    };
    assert_eq!(replaced, Some(first));
    assert_ne!(anchor.message_id, first.message_id);
    assert_eq!(harness.birthday_row(GUILD).await.embed_info, Some(anchor));
    assert_eq!(harness.discord.messages_in(BIRTHDAYS_CHANNEL).len(), 1);
}

#[tokio::test]
async fn test_rejected_edit_sends_new_list() {
    let harness = TestHarness::new();
    let first = harness
        .birthdays()
        .set_channel(GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap()
        .anchor()
        .unwrap();
    harness.discord.deny_edits(true);

    let outcome = harness.embeds().render(GUILD).await.unwrap();

    let RenderOutcome::Sent { anchor, replaced } = outcome else {
        panic!("expected a new list message, got {outcome:?}");
    };
    assert_eq!(replaced, Some(first));
    assert_ne!(anchor.message_id, first.message_id);
    assert_eq!(harness.birthday_row(GUILD).await.embed_info, Some(anchor));
    assert!(harness.discord.edits().is_empty());
}

#[tokio::test]
async fn test_deleted_channel_clears_config() {
    let harness = TestHarness::new();
    harness.birthdays().set_channel(GUILD, BIRTHDAYS_CHANNEL).await.unwrap();
    harness.discord.delete_channel(GUILD, BIRTHDAYS_CHANNEL);

    let outcome = harness.embeds().render(GUILD).await.unwrap();

    assert_eq!(
        outcome,
        RenderOutcome::ChannelCleared {
            channel_id: BIRTHDAYS_CHANNEL
        }
    );
    let row = harness.birthday_row(GUILD).await;
    assert!(row.birthday_channel_id.is_none());
    assert!(row.embed_info.is_none());

    // Nothing left to do afterwards
    assert_eq!(harness.embeds().render(GUILD).await.unwrap(), RenderOutcome::NoChannel);
}

#[tokio::test]
async fn test_failed_send_stores_no_anchor() {
    let harness = TestHarness::new();
    harness.discord.fail_sends(true);

    let outcome = harness
        .birthdays()
        .set_channel(GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap();

    assert!(matches!(outcome, RenderOutcome::SendFailed { .. }));
    let row = harness.birthday_row(GUILD).await;
    assert_eq!(row.birthday_channel_id, Some(BIRTHDAYS_CHANNEL));
    assert!(row.embed_info.is_none());

    harness.discord.fail_sends(false);
    assert!(harness.embeds().render(GUILD).await.unwrap().is_live());
}

#[tokio::test]
async fn test_set_channel_rejects_unknown_channel() {
    let harness = TestHarness::new();

    let err = harness
        .birthdays()
        .set_channel(GUILD, Snowflake::new(4242))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::ChannelNotFound(_))));
    assert!(harness.birthday_row(GUILD).await.birthday_channel_id.is_none());
}

#[tokio::test]
async fn test_publish_moves_list() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "05/05")]).await;

    let first = harness.embeds().publish(GUILD, BIRTHDAYS_CHANNEL).await.unwrap();
    assert!(first.channel_changed);
    assert_eq!(
        first.message(),
        format!("Birthday embed sent to <#{BIRTHDAYS_CHANNEL}> successfully!")
    );

    let again = harness.embeds().publish(GUILD, BIRTHDAYS_CHANNEL).await.unwrap();
    assert!(!again.channel_changed);
    assert!(matches!(again.render, RenderOutcome::Edited { .. }));

    let moved = harness.embeds().publish(GUILD, GENERAL_CHANNEL).await.unwrap();
    assert!(moved.channel_changed);
    let anchor = moved.render.anchor().unwrap();
    assert_eq!(anchor.channel_id, GENERAL_CHANNEL);
    assert_eq!(harness.discord.messages_in(GENERAL_CHANNEL).len(), 1);
}

// ============================================================================
// Raw embed edits
// ============================================================================

#[tokio::test]
async fn test_edit_embed_updates_title_only() {
    let harness = TestHarness::new();
    let message_id = harness.discord.post_foreign(
        GENERAL_CHANNEL,
        "",
        vec![Embed::new().title("Rules").description("Be nice").color(0xFF_0000)],
    );

    let edited = harness
        .embeds()
        .edit_embed(GUILD, edit_request(&message_id.to_string(), Some("House rules"), None))
        .await
        .unwrap();

    let embed = &edited.message.embeds[0];
    assert_eq!(embed.title.as_deref(), Some("House rules"));
    assert_eq!(embed.description.as_deref(), Some("Be nice"));
    assert_eq!(embed.color, Some(0xFF_0000));
    assert_eq!(
        edited.message(),
        format!("Embed in message `{message_id}` updated successfully in <#{GENERAL_CHANNEL}>.")
    );
}

#[tokio::test]
async fn test_edit_embed_errors() {
    let harness = TestHarness::new();
    let plain = harness.discord.post_foreign(GENERAL_CHANNEL, "hello", Vec::new());
    let embeds = harness.embeds();

    let err = embeds
        .edit_embed(GUILD, edit_request("abc", Some("x"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidId(_))));

    let err = embeds
        .edit_embed(GUILD, edit_request(&plain.to_string(), None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::NothingToUpdate)));

    let err = embeds
        .edit_embed(GUILD, edit_request("123", Some("x"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::MessageNotFound(_))));

    let err = embeds
        .edit_embed(GUILD, edit_request(&plain.to_string(), None, Some("y")))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::NoEmbed)));
    assert_eq!(harness.discord.message(plain).unwrap().text, "hello");
    assert!(harness.discord.edits().is_empty());
}

#[tokio::test]
async fn test_list_anchor_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let now = at(3, 25, 10);

    let blobs = dino_store::FileBlobStore::open(dir.path()).await.unwrap();
    let discord = std::sync::Arc::new(FakeDiscord::new());
    seed_world(&discord);
    let harness = TestHarness::with_discord(discord.clone(), dino_store::Store::new(blobs), now);
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;
    let anchor: EmbedAnchor = harness
        .birthdays()
        .set_channel(GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap()
        .anchor()
        .unwrap();
    drop(harness);

    let blobs = dino_store::FileBlobStore::open(dir.path()).await.unwrap();
    let restarted = TestHarness::with_discord(discord, dino_store::Store::new(blobs), now);

    let outcome = restarted.embeds().render(GUILD).await.unwrap();
    assert_eq!(outcome, RenderOutcome::Edited { anchor });
    assert_eq!(restarted.discord.sent().len(), 1);
}

#[tokio::test]
async fn test_reads_map_shaped_birthday_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("birthdays.json"),
        r#"{
            "100": {
                "users": {"1002": "03/26", "1001": "03/25"},
                "birthday_channel_id": 5001,
                "embed_info": {"channel_id": null, "message_id": null}
            }
        }"#,
    )
    .unwrap();

    let blobs = dino_store::FileBlobStore::open(dir.path()).await.unwrap();
    let discord = std::sync::Arc::new(FakeDiscord::new());
    seed_world(&discord);
    let harness = TestHarness::with_discord(discord, dino_store::Store::new(blobs), at(3, 25, 10));

    let row = harness.birthday_row(GUILD).await;
    let ids: Vec<Snowflake> = row.users.iter().map(|e| e.user_id).collect();
    assert_eq!(ids, vec![BOB, ALICE]);
    assert!(row.embed_info.is_none());

    let outcome = harness.embeds().render(GUILD).await.unwrap();
    assert!(matches!(outcome, RenderOutcome::Sent { replaced: None, .. }));
    let message = harness.discord.messages_in(BIRTHDAYS_CHANNEL).remove(0);
    assert_eq!(embed_description(&message), "• **alice**: 03/25\n• **bob**: 03/26");
}
