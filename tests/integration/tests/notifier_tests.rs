//! Daily notifier integration tests
//!
//! Run with: cargo test -p integration-tests --test notifier_tests

use std::sync::Arc;
use std::time::Duration;

use dino_service::RenderOutcome;
use dino_store::Birthdays;
use integration_tests::*;

async fn with_channel(harness: &TestHarness) {
    harness
        .birthdays()
        .set_channel(GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap();
}

fn greetings_in(harness: &TestHarness) -> Vec<String> {
    harness
        .discord
        .messages_in(BIRTHDAYS_CHANNEL)
        .into_iter()
        .filter(|m| m.text.contains("Happy Birthday"))
        .map(|m| m.text)
        .collect()
}

#[tokio::test]
async fn test_greets_todays_birthdays() {
    let harness = TestHarness::at(at(3, 25, 9));
    with_channel(&harness).await;
    register_all(&harness, GUILD, &[(ALICE, "03/25"), (BOB, "03/26")]).await;

    let report = harness.notifier().run_tick().await;

    assert_eq!(report.greetings(), 1);
    let tick = report.guild(GUILD).unwrap();
    assert_eq!(tick.greeted, vec![ALICE]);
    assert!(matches!(tick.render, Some(RenderOutcome::Edited { .. })));

    let greetings = greetings_in(&harness);
    assert_eq!(greetings.len(), 1);
    assert!(greetings[0].contains("<@1001>"));

    // The record stays; birthdays recur every year
    assert!(harness.birthdays().get_birthday(GUILD, ALICE).await.unwrap().is_some());
    let list = harness.birthday_row(GUILD).await.embed_info.unwrap();
    let message = harness.discord.message(list.message_id).unwrap();
    assert_eq!(embed_description(&message), "• **alice**: 03/25\n• **bob**: 03/26");
}

#[tokio::test]
async fn test_no_greetings_on_other_days() {
    let harness = TestHarness::at(at(6, 1, 9));
    with_channel(&harness).await;
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;

    let report = harness.notifier().run_tick().await;

    assert_eq!(report.greetings(), 0);
    assert!(greetings_in(&harness).is_empty());
}

#[tokio::test]
async fn test_departed_celebrant_is_removed() {
    let harness = TestHarness::new();
    with_channel(&harness).await;
    register_all(&harness, GUILD, &[(ALICE, "03/25"), (BOB, "03/25")]).await;
    harness.discord.kick_member(GUILD, BOB);

    let report = harness.notifier().run_tick().await;

    let tick = report.guild(GUILD).unwrap();
    assert_eq!(tick.greeted, vec![ALICE]);
    assert_eq!(tick.removed, vec![BOB]);
    assert!(harness.birthdays().get_birthday(GUILD, BOB).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_greeting_keeps_record() {
    let harness = TestHarness::new();
    with_channel(&harness).await;
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;
    harness.discord.fail_sends(true);

    let report = harness.notifier().run_tick().await;

    assert!(report.failures.is_empty());
    let tick = report.guild(GUILD).unwrap();
    assert!(tick.greeted.is_empty());
    assert!(tick.removed.is_empty());
    assert!(greetings_in(&harness).is_empty());
    assert!(harness.birthdays().get_birthday(GUILD, ALICE).await.unwrap().is_some());
}

#[tokio::test]
async fn test_missing_channel_skips_greetings_but_renders() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;

    let report = harness.notifier().run_tick().await;

    let tick = report.guild(GUILD).unwrap();
    assert!(tick.greeted.is_empty());
    assert_eq!(tick.render, Some(RenderOutcome::NoChannel));
    assert!(harness.discord.sent().is_empty());
}

#[tokio::test]
async fn test_deleted_channel_is_cleared() {
    let harness = TestHarness::new();
    with_channel(&harness).await;
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;
    harness.discord.delete_channel(GUILD, BIRTHDAYS_CHANNEL);

    let report = harness.notifier().run_tick().await;

    let tick = report.guild(GUILD).unwrap();
    assert!(tick.channel_cleared);
    assert!(tick.greeted.is_empty());
    let row = harness.birthday_row(GUILD).await;
    assert!(row.birthday_channel_id.is_none());
    assert!(row.embed_info.is_none());
    assert_eq!(row.users.len(), 1);
}

#[tokio::test]
async fn test_departed_guild_is_dropped() {
    let harness = TestHarness::new();
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;
    harness.discord.delete_guild(GUILD);

    let report = harness.notifier().run_tick().await;

    assert!(report.guild(GUILD).unwrap().dropped);
    let json = harness.table_json::<Birthdays>().unwrap();
    assert!(json.get("100").is_none());
}

#[tokio::test]
async fn test_guild_failures_are_isolated() {
    let harness = TestHarness::new();
    seed_guild(&harness.discord, OTHER_GUILD, "Other");
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;
    register_all(&harness, OTHER_GUILD, &[(ALICE, "03/25")]).await;
    harness
        .birthdays()
        .set_channel(OTHER_GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap();
    harness.discord.make_guild_unreachable(GUILD);

    let report = harness.notifier().run_tick().await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, GUILD);
    assert_eq!(report.guild(OTHER_GUILD).unwrap().greeted, vec![ALICE]);
    // Unreachable is not gone: the data stays
    assert_eq!(harness.birthday_row(GUILD).await.users.len(), 1);
}

#[tokio::test]
async fn test_undecodable_row_only_fails_its_guild() {
    let harness = TestHarness::new();
    seed_guild(&harness.discord, OTHER_GUILD, "Other");
    register_all(&harness, OTHER_GUILD, &[(ALICE, "03/25")]).await;
    harness
        .birthdays()
        .set_channel(OTHER_GUILD, BIRTHDAYS_CHANNEL)
        .await
        .unwrap();
    let mut json = harness.table_json::<Birthdays>().unwrap();
    json["100"] = serde_json::json!({"users": 42});
    harness.put_table_json::<Birthdays>(&json).await;

    let report = harness.notifier().run_tick().await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, GUILD);
    assert_eq!(report.guild(OTHER_GUILD).unwrap().greeted, vec![ALICE]);
    // The bad row is kept as it was
    let json = harness.table_json::<Birthdays>().unwrap();
    assert_eq!(json["100"]["users"], 42);
}

#[tokio::test]
async fn test_spawned_notifier_ticks_and_stops() {
    let harness = TestHarness::new();
    with_channel(&harness).await;
    register_all(&harness, GUILD, &[(ALICE, "03/25")]).await;

    let handle = Arc::new(harness.notifier()).spawn(Duration::from_secs(3600));
    assert!(handle.is_running());

    // The first tick fires immediately
    tokio::time::timeout(Duration::from_secs(5), async {
        while greetings_in(&harness).is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("greeting sent by the first tick");

    handle.stop().await;
    assert_eq!(greetings_in(&harness).len(), 1);
}
