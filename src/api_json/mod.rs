use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithm::{ramos_disponibles, Conflicto, Horario, ResumenRamo};
use crate::error::HorarioError;
use crate::models::{Ramo, TipoClase};
use crate::render::{a_csv, renderizar};

/// Petición para construir un horario.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "curso": 2,
///   "cuatrimestre": 1,
///   "ramos": ["Redes de Computadoras"],
///   "secciones_curso": { "CLIL": 3 },
///   "secciones": {
///     "Bases de Datos I": { "CLE": 1, "CLIL": 2 }
///   }
/// }
/// ```
///
/// # Campos:
/// - `curso`: si viene, se cargan todos los ramos de ese curso
/// - `cuatrimestre`: cuatrimestre del curso (por defecto 1); los anuales entran siempre
/// - `ramos`: nombres exactos de ramos extra a incluir
/// - `secciones_curso`: grupo por tipo de clase para todos los ramos del curso
/// - `secciones`: grupo por tipo de clase para un ramo concreto (se aplica al final)
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SolicitudHorario {
    #[serde(default)]
    pub curso: Option<u8>,
    #[serde(default)]
    pub cuatrimestre: Option<u8>,
    #[serde(default)]
    pub ramos: Vec<String>,
    #[serde(default)]
    pub secciones_curso: BTreeMap<String, u32>,
    #[serde(default)]
    pub secciones: BTreeMap<String, BTreeMap<String, u32>>,
}

#[derive(Debug, Serialize)]
pub struct RespuestaHorario {
    pub html: String,
    pub csv: String,
    pub conflictos: Vec<Conflicto>,
    pub colores: BTreeMap<String, String>,
    pub resumen: Vec<ResumenRamo>,
    pub max_secciones: BTreeMap<TipoClase, u32>,
    /// Ramos del cuatrimestre que aún se pueden añadir
    pub disponibles: Vec<String>,
}

pub fn parse_json_input(json_str: &str) -> Result<SolicitudHorario, serde_json::Error> {
    serde_json::from_str::<SolicitudHorario>(json_str)
}

/// Aplica la petición sobre un horario nuevo con el eje indicado.
pub fn construir_horario(
    catalogo: &[Ramo],
    sol: &SolicitudHorario,
    eje: (NaiveTime, NaiveTime),
) -> Result<Horario, HorarioError> {
    let mut horario = Horario::con_eje(eje.0, eje.1);
    let cuatrimestre = sol.cuatrimestre.unwrap_or(1);

    if let Some(curso) = sol.curso {
        horario.cargar_curso(catalogo, curso, cuatrimestre);
        for (codigo, seccion) in &sol.secciones_curso {
            let tipo = TipoClase::desde_codigo(codigo)?;
            horario.elegir_seccion_curso(curso, tipo, *seccion);
        }
    }

    for nombre in &sol.ramos {
        let ramo = catalogo
            .iter()
            .find(|r| &r.nombre == nombre)
            .ok_or_else(|| HorarioError::NotFound(nombre.clone()))?;
        horario.agregar_ramo(ramo.clone());
    }

    for (nombre, por_tipo) in &sol.secciones {
        for (codigo, seccion) in por_tipo {
            let tipo = TipoClase::desde_codigo(codigo)?;
            horario.elegir_seccion(nombre, tipo, *seccion)?;
        }
    }

    Ok(horario)
}

pub fn responder(catalogo: &[Ramo], horario: &Horario, cuatrimestre: u8) -> Result<RespuestaHorario, HorarioError> {
    let grilla = horario.grilla();
    let render = renderizar(grilla);
    Ok(RespuestaHorario {
        html: render.a_html(),
        csv: a_csv(grilla)?,
        conflictos: grilla.conflictos().to_vec(),
        colores: render.colores,
        resumen: horario.resumen(),
        max_secciones: horario.max_secciones(),
        disponibles: ramos_disponibles(catalogo, horario, cuatrimestre),
    })
}
