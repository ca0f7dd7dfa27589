// --- Generador de horarios - Archivo principal ---

use armahorario::catalogo::{cargar_catalogo, generar_catalogo, FuenteArchivos};
use armahorario::server::EstadoApp;
use armahorario::{logging, run_server, Config};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    logging::init();
    let cfg = Config::from_env();

    let mut catalogo = match cargar_catalogo(&cfg.catalogo) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("no se pudo cargar el catálogo '{}': {}", cfg.catalogo.display(), e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    // Ramos sin sesiones: se completan desde los exports en disco, si los hay
    if catalogo.iter().any(|r| r.bloques.is_empty()) && cfg.sesiones_dir.is_dir() {
        let fuente = FuenteArchivos::new(&cfg.sesiones_dir);
        if let Err(e) = generar_catalogo(&cfg.catalogo, &mut catalogo, &fuente) {
            tracing::warn!("no se pudo guardar el catálogo completado: {}", e);
        }
    }

    let estado = EstadoApp { catalogo, eje_inicial: cfg.eje_inicial };
    run_server(&cfg.bind, estado).await
}
