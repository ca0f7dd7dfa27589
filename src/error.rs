// Errores del generador de horarios.
//
// Los conflictos de horario NO son errores: la grilla los muestra y se
// registran con `tracing::warn!`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HorarioError {
    /// El ramo no está en el horario (quitar / elegir sección)
    #[error("ramo no encontrado en el horario: '{0}'")]
    NotFound(String),

    /// Fallo de red o de parseo al obtener las sesiones de un ramo
    #[error("error obteniendo datos de '{ramo}': {motivo}")]
    Fetch { ramo: String, motivo: String },

    /// Catálogo persistido mal formado
    #[error("catálogo inválido: {0}")]
    Parse(String),

    #[error("tipo de clase no reconocido: '{0}'")]
    UnrecognizedSessionType(String),

    #[error("día de la semana no reconocido: '{0}'")]
    UnrecognizedWeekday(String),

    #[error("categoría de ramo no reconocida: '{0}'")]
    UnrecognizedCategory(String),

    /// Inicio >= fin, o horas fuera de la granularidad de 30 minutos
    #[error("sesión inválida: {0}")]
    InvalidSession(String),

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("error escribiendo CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl From<serde_json::Error> for HorarioError {
    fn from(e: serde_json::Error) -> Self {
        HorarioError::Parse(e.to_string())
    }
}

impl HorarioError {
    /// Convierte cualquier error en un `Fetch` etiquetado con el nombre del ramo.
    pub fn fetch(ramo: &str, motivo: impl std::fmt::Display) -> Self {
        HorarioError::Fetch { ramo: ramo.to_string(), motivo: motivo.to_string() }
    }
}
