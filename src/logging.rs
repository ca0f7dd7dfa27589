// Inicialización de logs con tracing-subscriber.
//
// RUST_LOG controla el filtro (por defecto "info"), p.ej.
// RUST_LOG=armahorario=debug para ver ampliaciones del eje y ajustes de grupo.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).with_line_number(true).init();
}

/// Para tests: nivel debug, salida capturada por el harness. Se puede
/// llamar varias veces.
pub fn init_test() {
    let _ = fmt().with_env_filter(EnvFilter::new("debug")).with_test_writer().try_init();
}
