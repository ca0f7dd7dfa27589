//! Catálogo de ramos: formato persistido y obtención de sesiones.
//!
//! Submódulos:
//! - `filas`: lectura de las filas de texto extraídas de las páginas
//! - `fuente`: contrato `FuenteSesiones`, fuente en disco y carga por lotes
//!
//! El catálogo persistido es un array JSON con un objeto por ramo; horas y
//! fechas en ISO-8601, las aulas de examen como array ordenado.

pub mod filas;
pub mod fuente;

pub use fuente::{completar_catalogo, DatosRamo, ExportRamo, FuenteArchivos, FuenteSesiones, ResultadoCarga};

use std::path::Path;

use crate::error::HorarioError;
use crate::models::Ramo;

/// Lee el catálogo persistido. Un fichero mal formado es un error fatal.
pub fn cargar_catalogo<P: AsRef<Path>>(ruta: P) -> Result<Vec<Ramo>, HorarioError> {
    let ruta = ruta.as_ref();
    let texto = std::fs::read_to_string(ruta)?;
    let ramos: Vec<Ramo> = serde_json::from_str(&texto)
        .map_err(|e| HorarioError::Parse(format!("{}: {}", ruta.display(), e)))?;
    for ramo in &ramos {
        for bloque in &ramo.bloques {
            bloque
                .validar()
                .map_err(|e| HorarioError::Parse(format!("'{}': {}", ramo.nombre, e)))?;
        }
    }
    tracing::info!("catálogo '{}' cargado: {} ramos", ruta.display(), ramos.len());
    Ok(ramos)
}

pub fn guardar_catalogo<P: AsRef<Path>>(ruta: P, ramos: &[Ramo]) -> Result<(), HorarioError> {
    let texto = serde_json::to_string_pretty(ramos)?;
    std::fs::write(ruta.as_ref(), texto)?;
    Ok(())
}

/// Completa las sesiones de todos los ramos y guarda el catálogo, aunque
/// algunos ramos fallen. Devuelve el resultado de cada ramo.
pub fn generar_catalogo<P, F>(ruta: P, ramos: &mut [Ramo], fuente: &F) -> Result<Vec<ResultadoCarga>, HorarioError>
where
    P: AsRef<Path>,
    F: FuenteSesiones + ?Sized,
{
    let resultados = completar_catalogo(ramos, fuente);
    guardar_catalogo(ruta, ramos)?;
    Ok(resultados)
}
