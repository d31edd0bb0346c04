use std::collections::HashMap;
use std::sync::Arc;

use photo_adapters::{Gateway, MemoryArchiveSink};
use photo_core::{SessionEngine, UserId};
use photoflow::config::{AppConfig, ARCHIVE_DESTINATION_VAR, STEPS_VAR, SUMMARY_SEPARATOR_VAR};
use photoflow::console::{parse_line, DEFAULT_CONSOLE_USER};

fn config() -> AppConfig {
    let vars: HashMap<&str, &str> = [(STEPS_VAR, "front,meter,seal"), (ARCHIVE_DESTINATION_VAR, "ops-archive"), (SUMMARY_SEPARATOR_VAR, " | ")].into_iter()
                                                                                                                                            .collect();
    AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).expect("config")
}

#[test]
fn config_serializes_for_diagnostics() {
    let json = serde_json::to_value(config()).expect("json");
    assert_eq!(json["steps"], serde_json::json!(["front", "meter", "seal"]));
    assert_eq!(json["archive_destination"], "ops-archive");
}

#[test]
fn console_script_runs_a_full_session() {
    let cfg = config();
    let sink = Arc::new(MemoryArchiveSink::new(cfg.archive_destination.clone()));
    let engine = SessionEngine::builder(cfg.catalog().expect("catalog")).archive_sink(sink.clone())
                                                                        .summary_separator(cfg.summary_separator.clone())
                                                                        .build();
    let gateway = Gateway::new(Arc::new(engine));

    let script = ["/start", "photo f-1", "confirm", "", "skip", "photo s-1", "photo s-2", "@9 photo stray", "confirm"];
    let mut transcript = Vec::new();
    tokio_test::block_on(async {
        for line in script {
            if let Some(update) = parse_line(line, DEFAULT_CONSOLE_USER).expect("valid line") {
                transcript.extend(gateway.on_update(update).await);
            }
        }
    });

    let last = transcript.last().expect("replies");
    assert_eq!(last.user, DEFAULT_CONSOLE_USER);
    assert_eq!(last.text, "All steps done. Summary: front: 1 | meter: 0 | seal: 2");
    assert!(transcript.iter().all(|m| m.user != UserId(9)));

    let sent = tokio_test::block_on(sink.sent());
    let refs: Vec<&str> = sent.iter().map(|s| s.artifact.as_str()).collect();
    assert_eq!(refs, vec!["f-1", "s-1", "s-2"]);
    assert!(sent.iter().all(|s| s.destination == "ops-archive"));
}
