//! Demo de consola: cada línea de stdin se trata como un mensaje de chat.
use std::sync::Arc;

use photo_adapters::{Gateway, LoggingArchiveSink, OutboundMessage};
use photo_core::{SessionEngine, SessionStore};
use photoflow::config::AppConfig;
use photoflow::console::{parse_line, DEFAULT_CONSOLE_USER};
use photoflow::errors::CoreError;
use photoflow::logging::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};

fn print_reply(msg: &OutboundMessage) {
    if msg.buttons.is_empty() {
        println!("[{}] {}", msg.user, msg.text);
    } else {
        println!("[{}] {}  [{}]", msg.user, msg.text, msg.buttons.join(" | "));
    }
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    init_tracing();
    let config = AppConfig::from_env()?;
    let catalog = config.catalog()?;
    tracing::info!(steps = catalog.count(), destination = %config.archive_destination, "photoflow listo");

    let sink = Arc::new(LoggingArchiveSink::new(config.archive_destination.clone()));
    let engine = SessionEngine::builder(catalog).archive_sink(sink)
                                                .summary_separator(config.summary_separator.clone())
                                                .build();
    let gateway = Gateway::new(Arc::new(engine));

    println!("Pasos: {}", config.steps.join(" -> "));
    println!("Comandos: /start, photo <ref>, confirm, skip, cancel, /status. Prefijo @<id> para cambiar de usuario.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let update = match parse_line(&line, DEFAULT_CONSOLE_USER) {
            Ok(Some(update)) => update,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        for msg in gateway.on_update(update).await {
            print_reply(&msg);
        }
    }
    tracing::info!(users = gateway.engine().store().tracked_users(), "fin de entrada");
    Ok(())
}
