//! Flujo completo a través del gateway: texto de chat -> engine -> mensajes.

use std::sync::Arc;

use photo_adapters::{ArchiveSend, ChatUpdate, FlakyArchiveSink, Gateway, MemoryArchiveSink};
use photo_core::{ArtifactRef, EventStore, SessionEngine, StepCatalog, UserId};

fn gateway(sink: Arc<dyn photo_core::ArchiveSink>) -> Gateway<photo_core::InMemorySessionStore, photo_core::InMemoryEventStore> {
    let catalog = StepCatalog::new(["overview photo", "gauge photo"]).expect("catalog");
    Gateway::new(Arc::new(SessionEngine::new(catalog, sink)))
}

async fn texts(gw: &Gateway<photo_core::InMemorySessionStore, photo_core::InMemoryEventStore>, update: ChatUpdate) -> Vec<String> {
    gw.on_update(update).await.into_iter().map(|m| m.text).collect()
}

#[tokio::test]
async fn chat_run_archives_with_step_captions() {
    let sink = Arc::new(MemoryArchiveSink::new("archive-chat"));
    let gw = gateway(sink.clone());
    let user = UserId(42);

    assert_eq!(texts(&gw, ChatUpdate::text(user.clone(), "/start")).await, vec!["Please send the overview photo."]);
    assert_eq!(texts(&gw, ChatUpdate::photo(user.clone(), "f1")).await, vec!["Photo recorded for overview photo."]);
    assert_eq!(texts(&gw, ChatUpdate::text(user.clone(), "confirm")).await, vec!["Please send the gauge photo."]);
    assert_eq!(texts(&gw, ChatUpdate::text(user.clone(), "skip")).await,
               vec!["All steps done. Summary: overview photo: 1, gauge photo: 0"]);

    assert_eq!(sink.sent().await,
               vec![ArchiveSend { destination: "archive-chat".into(),
                                  artifact: ArtifactRef::new("f1"),
                                  caption: "overview photo".into() }]);
}

#[tokio::test]
async fn stray_and_unknown_updates_get_no_reply() {
    let sink = Arc::new(MemoryArchiveSink::new("archive-chat"));
    let gw = gateway(sink.clone());
    let user = UserId(7);

    assert!(gw.on_update(ChatUpdate::photo(user.clone(), "stray")).await.is_empty());
    assert!(gw.on_update(ChatUpdate::text(user.clone(), "confirm")).await.is_empty());
    assert!(gw.on_update(ChatUpdate::text(user.clone(), "what is this?")).await.is_empty());
    assert_eq!(texts(&gw, ChatUpdate::text(user.clone(), "/status")).await,
               vec!["No active session. Send /start to begin."]);
    assert!(gw.engine().event_store().list(&user).is_empty());
}

#[tokio::test]
async fn archive_failure_still_delivers_summary() {
    let memory = Arc::new(MemoryArchiveSink::new("archive-chat"));
    let flaky = Arc::new(FlakyArchiveSink::new(memory.clone(), ["bad"]));
    let gw = gateway(flaky);
    let user = UserId(8);

    gw.on_update(ChatUpdate::text(user.clone(), "/start")).await;
    gw.on_update(ChatUpdate::photo(user.clone(), "bad")).await;
    gw.on_update(ChatUpdate::photo(user.clone(), "good")).await;
    gw.on_update(ChatUpdate::text(user.clone(), "next")).await;
    let replies = texts(&gw, ChatUpdate::text(user.clone(), "confirm")).await;

    assert_eq!(replies, vec!["All steps done. Summary: overview photo: 2, gauge photo: 0"]);
    let delivered: Vec<String> = memory.sent().await.into_iter().map(|s| s.artifact.to_string()).collect();
    assert_eq!(delivered, vec!["good"]);
    assert!(gw.engine().event_store().event_variants(&user).contains(&"F"), "failure is journaled");
}

#[tokio::test]
async fn cancel_replies_and_status_tracks_progress() {
    let gw = gateway(Arc::new(MemoryArchiveSink::new("archive-chat")));
    let user = UserId(9);

    gw.on_update(ChatUpdate::text(user.clone(), "/start")).await;
    gw.on_update(ChatUpdate::photo(user.clone(), "f1")).await;
    assert_eq!(texts(&gw, ChatUpdate::text(user.clone(), "/status")).await,
               vec!["Step 1 (overview photo): 1 photo(s) recorded."]);
    assert_eq!(texts(&gw, ChatUpdate::text(user.clone(), "/cancel")).await,
               vec!["Session cancelled. Send /start to begin again."]);
    assert!(gw.on_update(ChatUpdate::photo(user.clone(), "f2")).await.is_empty());
}
