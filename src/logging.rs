//! Inicialización de logging.
//!
//! Los crates de librería emiten por la fachada `log`; el subscriber de
//! `tracing-subscriber` los recoge junto con los eventos `tracing` del
//! binario. Filtro por `RUST_LOG`, `info` por defecto.
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_target(false)
                                     .try_init();
}
