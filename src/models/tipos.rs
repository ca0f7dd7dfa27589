// Enumeraciones cerradas del modelo y sus tablas de lectura desde el texto
// del catálogo. Ninguna lectura "adivina": un texto desconocido es error.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::sin_tildes;
use crate::error::HorarioError;

/// Días lectivos. El orden de declaración es el orden de las columnas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dia {
    Lunes,
    Martes,
    #[serde(rename = "Miércoles")]
    Miercoles,
    Jueves,
    Viernes,
}

impl Dia {
    pub const TODOS: [Dia; 5] = [Dia::Lunes, Dia::Martes, Dia::Miercoles, Dia::Jueves, Dia::Viernes];

    /// Índice de columna (0 = lunes)
    pub fn indice(self) -> usize {
        self as usize
    }

    pub fn etiqueta(self) -> &'static str {
        match self {
            Dia::Lunes => "Lunes",
            Dia::Martes => "Martes",
            Dia::Miercoles => "Miércoles",
            Dia::Jueves => "Jueves",
            Dia::Viernes => "Viernes",
        }
    }

    pub fn desde_etiqueta(s: &str) -> Result<Dia, HorarioError> {
        match sin_tildes(s.trim()).to_lowercase().as_str() {
            "lunes" => Ok(Dia::Lunes),
            "martes" => Ok(Dia::Martes),
            "miercoles" => Ok(Dia::Miercoles),
            "jueves" => Ok(Dia::Jueves),
            "viernes" => Ok(Dia::Viernes),
            _ => Err(HorarioError::UnrecognizedWeekday(s.to_string())),
        }
    }
}

impl fmt::Display for Dia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.etiqueta())
    }
}

/// Tipo de clase. Cada tipo tiene su propia numeración de grupos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TipoClase {
    #[serde(rename = "CLE")]
    Expositiva,
    #[serde(rename = "CLIL")]
    Interactiva,
    #[serde(rename = "CLIS")]
    Seminario,
}

impl TipoClase {
    pub const TODOS: [TipoClase; 3] = [TipoClase::Expositiva, TipoClase::Interactiva, TipoClase::Seminario];

    /// Letra usada en las etiquetas de la grilla ("MA E1")
    pub fn letra(self) -> char {
        match self {
            TipoClase::Expositiva => 'E',
            TipoClase::Interactiva => 'I',
            TipoClase::Seminario => 'S',
        }
    }

    pub fn codigo(self) -> &'static str {
        match self {
            TipoClase::Expositiva => "CLE",
            TipoClase::Interactiva => "CLIL",
            TipoClase::Seminario => "CLIS",
        }
    }

    /// Acepta sólo los códigos del catálogo (CLE, CLIL, CLIS) o la letra
    /// de la grilla (E, I, S). Cualquier otro texto es un error.
    pub fn desde_codigo(s: &str) -> Result<TipoClase, HorarioError> {
        match s.trim().to_uppercase().as_str() {
            "CLE" | "E" => Ok(TipoClase::Expositiva),
            "CLIL" | "I" => Ok(TipoClase::Interactiva),
            "CLIS" | "S" => Ok(TipoClase::Seminario),
            _ => Err(HorarioError::UnrecognizedSessionType(s.to_string())),
        }
    }
}

impl fmt::Display for TipoClase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codigo())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Categoria {
    #[serde(rename = "Formación básica")]
    FormacionBasica,
    #[serde(rename = "Obligatorio")]
    Obligatoria,
    #[serde(rename = "Optativo")]
    Optativa,
}

impl Categoria {
    pub fn desde_etiqueta(s: &str) -> Result<Categoria, HorarioError> {
        match sin_tildes(s.trim()).to_lowercase().as_str() {
            "formacion basica" => Ok(Categoria::FormacionBasica),
            "obligatorio" | "obligatoria" => Ok(Categoria::Obligatoria),
            "optativo" | "optativa" => Ok(Categoria::Optativa),
            _ => Err(HorarioError::UnrecognizedCategory(s.to_string())),
        }
    }

    /// Sección por defecto al cargar las sesiones: los optativos empiezan
    /// sin grupo (0), el resto en el grupo 1.
    pub fn seccion_por_defecto(self) -> u32 {
        match self {
            Categoria::Optativa => 0,
            Categoria::FormacionBasica | Categoria::Obligatoria => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tipo_clase_codigos_exactos() {
        assert_eq!(TipoClase::desde_codigo("CLE").unwrap(), TipoClase::Expositiva);
        assert_eq!(TipoClase::desde_codigo("clil").unwrap(), TipoClase::Interactiva);
        assert_eq!(TipoClase::desde_codigo(" CLIS ").unwrap(), TipoClase::Seminario);
        assert_eq!(TipoClase::desde_codigo("I").unwrap(), TipoClase::Interactiva);
    }

    #[test]
    fn test_tipo_clase_no_adivina_prefijos() {
        // "CL" es prefijo de los tres códigos: no se elige ninguno
        for raw in ["CL", "CLI", "CLEX", "TODO", ""] {
            match TipoClase::desde_codigo(raw) {
                Err(HorarioError::UnrecognizedSessionType(s)) => assert_eq!(s, raw),
                other => panic!("esperaba UnrecognizedSessionType para '{}', obtuve {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_dia_desde_etiqueta() {
        assert_eq!(Dia::desde_etiqueta("Miércoles").unwrap(), Dia::Miercoles);
        assert_eq!(Dia::desde_etiqueta("miercoles").unwrap(), Dia::Miercoles);
        assert_eq!(Dia::desde_etiqueta("VIERNES").unwrap(), Dia::Viernes);
        assert!(matches!(Dia::desde_etiqueta("Sábado"), Err(HorarioError::UnrecognizedWeekday(_))));
    }

    #[test]
    fn test_categoria() {
        assert_eq!(Categoria::desde_etiqueta("Formación básica").unwrap(), Categoria::FormacionBasica);
        assert_eq!(Categoria::desde_etiqueta("Optativo").unwrap().seccion_por_defecto(), 0);
        assert_eq!(Categoria::desde_etiqueta("Obligatorio").unwrap().seccion_por_defecto(), 1);
        assert!(Categoria::desde_etiqueta("Libre").is_err());
    }
}
