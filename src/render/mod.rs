//! Presentación de la grilla: colores por abreviatura, estilo por celda y
//! colapso de filas vacías.
//!
//! Submódulos:
//! - `html`: tabla HTML con estilos en línea
//! - `tabla_csv`: volcado de la grilla cruda

mod tabla_csv;
mod html;

pub use tabla_csv::a_csv;

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::algorithm::{Grilla, SEPARADOR};

/// Fondo de celdas vacías
pub const FONDO_VACIO: &str = "#fff6eb";
/// Fondo de las cabeceras de la tabla
pub const FONDO_CABECERA: &str = "#fac27d";
/// Saturación del barrido de colores
const SATURACION: f64 = 0.4;

/// Fondo de las celdas con conflicto (rojo suave, h = 0)
pub fn fondo_conflicto() -> String {
    a_hex(hsv_a_rgb(0.0, SATURACION, 1.0))
}

/// HSV -> RGB, todos los componentes en [0, 1].
pub fn hsv_a_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// "#rrggbb" truncando cada componente (x * 255).
pub fn a_hex((r, g, b): (f64, f64, f64)) -> String {
    let c = |x: f64| (x.clamp(0.0, 1.0) * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", c(r), c(g), c(b))
}

/// Asigna un color a cada abreviatura presente en celdas no vacías y sin
/// conflicto. El orden es el del conjunto ordenado, así que el resultado
/// sólo depende de qué abreviaturas hay.
pub fn asignar_colores(grilla: &Grilla) -> BTreeMap<String, String> {
    let mut abreviaturas: BTreeSet<String> = BTreeSet::new();
    for (_, celdas) in grilla.filas_texto() {
        for texto in celdas.iter() {
            if texto.is_empty() || texto.contains('/') {
                continue;
            }
            abreviaturas.insert(abreviatura_de(texto).to_string());
        }
    }
    let total = abreviaturas.len() as f64;
    abreviaturas
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            let h = (i as f64 + 1.0) / (total + 1.0);
            (a, a_hex(hsv_a_rgb(h, SATURACION, 1.0)))
        })
        .collect()
}

fn abreviatura_de(etiqueta: &str) -> &str {
    etiqueta.split(' ').next().unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstiloCelda {
    pub fondo: String,
    pub cursiva: bool,
    pub negrita: bool,
    /// Separador dibujado antes de un tramo de filas colapsadas
    pub borde_inferior: bool,
}

impl EstiloCelda {
    pub fn css(&self) -> String {
        let mut css = format!("background: {}", self.fondo);
        if self.cursiva {
            css.push_str("; font-style: italic");
        }
        if self.negrita {
            css.push_str("; font-weight: bold");
        }
        if self.borde_inferior {
            css.push_str("; border-bottom: 2px solid black");
        }
        css
    }
}

/// Estilo de una celda según su texto. Prioridad: vacía, conflicto, ramo.
pub fn estilo_celda(texto: &str, colores: &BTreeMap<String, String>) -> EstiloCelda {
    if texto.is_empty() {
        return EstiloCelda { fondo: FONDO_VACIO.to_string(), cursiva: false, negrita: false, borde_inferior: false };
    }
    if texto.contains(SEPARADOR.trim()) {
        return EstiloCelda { fondo: fondo_conflicto(), cursiva: false, negrita: false, borde_inferior: false };
    }
    let codigo = texto.rsplit(' ').next().unwrap_or("");
    EstiloCelda {
        fondo: colores
            .get(abreviatura_de(texto))
            .cloned()
            .unwrap_or_else(|| FONDO_VACIO.to_string()),
        cursiva: codigo.contains('E'),
        negrita: codigo.contains('I'),
        borde_inferior: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CeldaRenderizada {
    pub texto: String,
    pub estilo: EstiloCelda,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilaRenderizada {
    #[serde(serialize_with = "serializar_hora")]
    pub hora: NaiveTime,
    pub celdas: [CeldaRenderizada; 5],
    /// La fila precede a un tramo de filas vacías eliminadas
    pub separador: bool,
}

fn serializar_hora<S: serde::Serializer>(h: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&h.format("%H:%M").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrillaRenderizada {
    pub filas: Vec<FilaRenderizada>,
    pub colores: BTreeMap<String, String>,
}

/// Colores + estilos + eliminación de filas vacías en todos los días.
pub fn renderizar(grilla: &Grilla) -> GrillaRenderizada {
    let colores = asignar_colores(grilla);
    let mut filas: Vec<FilaRenderizada> = Vec::new();
    let mut anterior_vacia = false;

    for (i, (hora, textos)) in grilla.filas_texto().into_iter().enumerate() {
        if textos.iter().all(|t| t.is_empty()) {
            // Sólo se marca el inicio de cada tramo, y nunca en la primera fila
            if !anterior_vacia && i > 0 {
                if let Some(previa) = filas.last_mut() {
                    previa.separador = true;
                    for c in previa.celdas.iter_mut() {
                        c.estilo.borde_inferior = true;
                    }
                }
            }
            anterior_vacia = true;
            continue;
        }
        anterior_vacia = false;
        let celdas = textos.map(|texto| {
            let estilo = estilo_celda(&texto, &colores);
            CeldaRenderizada { texto, estilo }
        });
        filas.push(FilaRenderizada { hora, celdas, separador: false });
    }

    GrillaRenderizada { filas, colores }
}
