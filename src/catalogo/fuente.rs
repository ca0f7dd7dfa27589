// Obtención de sesiones y exámenes por ramo, y carga por lotes tolerante a
// fallos: un ramo que falla no detiene a los demás.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::HorarioError;
use crate::models::{sin_tildes, Bloque, Examen, Ramo, TipoClase};
use super::filas::{bloque_desde_fila, parsear_aula, parsear_fecha_examen, FilaExamen, FilaSesion};

/// Lo que el catálogo sabe de un ramo una vez consultada su página.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatosRamo {
    pub bloques: Vec<Bloque>,
    pub examenes: Vec<Examen>,
    pub num_secciones: BTreeMap<TipoClase, u32>,
}

/// Origen de las sesiones de un ramo (red + HTML en producción).
pub trait FuenteSesiones {
    fn obtener(&self, ramo: &Ramo) -> Result<DatosRamo, HorarioError>;
}

/// Tablas de clases y exámenes de un ramo ya reducidas a texto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRamo {
    #[serde(default)]
    pub sesiones: Vec<FilaSesion>,
    #[serde(default)]
    pub examenes: Vec<FilaExamen>,
}

impl ExportRamo {
    pub fn a_datos(&self, ramo: &Ramo) -> Result<DatosRamo, HorarioError> {
        // Se reutiliza `Ramo` para fusionar aulas de exámenes y contar grupos
        let mut tmp = Ramo::new(ramo.nombre.clone(), "", ramo.curso, ramo.cuatrimestre, ramo.categoria);
        for fila in &self.sesiones {
            tmp.bloques.push(bloque_desde_fila(fila)?);
        }
        for fila in &self.examenes {
            tmp.agregar_examen(parsear_fecha_examen(&fila.fecha)?, parsear_aula(&fila.aula));
        }
        tmp.recalcular_num_secciones();
        Ok(DatosRamo { bloques: tmp.bloques, examenes: tmp.examenes, num_secciones: tmp.num_secciones })
    }
}

/// Nombre de fichero estable para un ramo: minúsculas ASCII y '_'.
pub fn nombre_archivo(ramo: &Ramo) -> String {
    let mut slug = String::new();
    for c in sin_tildes(&ramo.nombre).to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    format!("{}.json", slug.trim_matches('_'))
}

/// Lee `<dir>/<nombre_archivo(ramo)>` con el `ExportRamo` del ramo.
#[derive(Debug, Clone)]
pub struct FuenteArchivos {
    dir: PathBuf,
}

impl FuenteArchivos {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FuenteArchivos { dir: dir.as_ref().to_path_buf() }
    }

    pub fn ruta(&self, ramo: &Ramo) -> PathBuf {
        self.dir.join(nombre_archivo(ramo))
    }
}

impl FuenteSesiones for FuenteArchivos {
    fn obtener(&self, ramo: &Ramo) -> Result<DatosRamo, HorarioError> {
        let ruta = self.ruta(ramo);
        let texto = std::fs::read_to_string(&ruta)
            .map_err(|e| HorarioError::fetch(&ramo.nombre, format!("{}: {}", ruta.display(), e)))?;
        let export: ExportRamo =
            serde_json::from_str(&texto).map_err(|e| HorarioError::fetch(&ramo.nombre, e))?;
        export.a_datos(ramo).map_err(|e| HorarioError::fetch(&ramo.nombre, e))
    }
}

/// Resultado por ramo de una carga por lotes
#[derive(Debug)]
pub enum ResultadoCarga {
    Cargado { ramo: String, bloques: usize, examenes: usize },
    /// Ya tenía sesiones; no se volvió a consultar
    Omitido { ramo: String },
    Fallido { ramo: String, error: HorarioError },
}

impl ResultadoCarga {
    pub fn ramo(&self) -> &str {
        match self {
            ResultadoCarga::Cargado { ramo, .. }
            | ResultadoCarga::Omitido { ramo }
            | ResultadoCarga::Fallido { ramo, .. } => ramo,
        }
    }

    pub fn es_error(&self) -> bool {
        matches!(self, ResultadoCarga::Fallido { .. })
    }
}

/// Consulta las sesiones de cada ramo que aún no las tenga y aplica las
/// secciones por defecto (optativos 0, resto 1).
pub fn completar_catalogo<F: FuenteSesiones + ?Sized>(ramos: &mut [Ramo], fuente: &F) -> Vec<ResultadoCarga> {
    let mut out = Vec::with_capacity(ramos.len());
    for ramo in ramos.iter_mut() {
        if !ramo.bloques.is_empty() {
            out.push(ResultadoCarga::Omitido { ramo: ramo.nombre.clone() });
            continue;
        }
        tracing::info!("Obteniendo datos de '{}'", ramo.nombre);
        match fuente.obtener(ramo) {
            Ok(datos) => {
                ramo.bloques = datos.bloques;
                ramo.examenes = datos.examenes;
                ramo.num_secciones = datos.num_secciones;
                ramo.aplicar_secciones_por_defecto();
                out.push(ResultadoCarga::Cargado {
                    ramo: ramo.nombre.clone(),
                    bloques: ramo.bloques.len(),
                    examenes: ramo.examenes.len(),
                });
            }
            Err(e) => {
                let error = match e {
                    HorarioError::Fetch { .. } => e,
                    otro => HorarioError::fetch(&ramo.nombre, otro),
                };
                tracing::warn!("{}", error);
                out.push(ResultadoCarga::Fallido { ramo: ramo.nombre.clone(), error });
            }
        }
    }
    let fallidos = out.iter().filter(|r| r.es_error()).count();
    tracing::info!("carga terminada: {} ramos, {} con error", out.len(), fallidos);
    out
}
