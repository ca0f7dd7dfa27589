// Búsqueda aproximada de ramos por nombre.
use strsim::normalized_levenshtein;

use crate::models::Ramo;
use super::horario::Horario;

/// Máximo de resultados devueltos por `buscar_ramos`
pub const MAX_RESULTADOS: usize = 5;

/// Bonificación cuando la consulta aparece literalmente en el nombre
const BONUS_SUBCADENA: f64 = 100.0;

/// Puntúa cada ramo con la similitud (0-100) entre consulta y nombre, más
/// 100 si la consulta es subcadena del nombre. Devuelve los 5 mejores; los
/// empates conservan el orden de la lista (orden estable).
pub fn buscar_ramos<'a>(ramos: &'a [Ramo], consulta: &str) -> Vec<(&'a Ramo, f64)> {
    let mut puntuados: Vec<(&Ramo, f64)> = ramos
        .iter()
        .map(|r| {
            let mut score = normalized_levenshtein(consulta, &r.nombre) * 100.0;
            if r.nombre.contains(consulta) {
                score += BONUS_SUBCADENA;
            }
            (r, score)
        })
        .collect();
    puntuados.sort_by(|a, b| b.1.total_cmp(&a.1));
    puntuados.truncate(MAX_RESULTADOS);
    puntuados
}

/// Nombres de ramos del cuatrimestre que todavía no están en el horario.
pub fn ramos_disponibles(catalogo: &[Ramo], horario: &Horario, cuatrimestre: u8) -> Vec<String> {
    catalogo
        .iter()
        .filter(|r| r.cuatrimestre == cuatrimestre && !horario.contiene(&r.nombre))
        .map(|r| r.nombre.clone())
        .collect()
}
