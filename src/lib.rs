// Biblioteca raíz del crate `armahorario`.
// Modelo de ramos, motor de la grilla, renderizado y catálogo; el servidor
// HTTP es sólo un llamador más de estas operaciones.
pub mod algorithm;
pub mod api_json;
pub mod catalogo;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;

pub use algorithm::{calcular_grilla, Grilla, Horario};
pub use config::Config;
pub use error::HorarioError;
/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
