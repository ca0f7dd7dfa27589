//! Grilla franja × día y su cálculo a partir de los ramos de un horario.
//!
//! La grilla es una proyección pura: `calcular_grilla` parte del eje actual
//! del horario (vacío de contenido) y vuelve a colocar cada bloque cuya
//! sección coincide con la elegida para su tipo. Nunca se parchea.

use chrono::{Duration, NaiveTime, Timelike};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::{alinear_franja, Bloque, Dia, MINUTOS_FRANJA};
use super::horario::Horario;

/// Separador entre etiquetas de una celda en conflicto
pub const SEPARADOR: &str = " / ";

/// Hora por defecto del eje inicial (una sola franja)
pub fn hora_placeholder() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

type Fila = [BTreeSet<String>; 5];

/// Dos etiquetas distintas en la misma franja.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflicto {
    pub dia: Dia,
    #[serde(serialize_with = "serializar_hora")]
    pub hora: NaiveTime,
    /// Contenido de la celda antes de colocar `nuevo`
    pub existente: String,
    pub nuevo: String,
}

fn serializar_hora<S: serde::Serializer>(h: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&h.format("%H:%M").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grilla {
    franjas: Vec<NaiveTime>,
    filas: Vec<Fila>,
    conflictos: Vec<Conflicto>,
}

impl Default for Grilla {
    fn default() -> Self {
        let h = hora_placeholder();
        Grilla::con_eje(h, h)
    }
}

fn minutos(t: NaiveTime) -> i64 {
    (t.num_seconds_from_midnight() / 60) as i64
}

fn eje(desde: NaiveTime, hasta: NaiveTime) -> Vec<NaiveTime> {
    let paso = Duration::minutes(MINUTOS_FRANJA as i64);
    let mut out = vec![desde];
    let mut t = desde;
    while t < hasta {
        let (sig, vuelta) = t.overflowing_add_signed(paso);
        if vuelta != 0 {
            break;
        }
        out.push(sig);
        t = sig;
    }
    out
}

impl Grilla {
    /// Eje de `desde` a `hasta` (ambas incluidas) en pasos de 30 minutos.
    /// Horas fuera de la grilla se redondean hacia abajo a su franja.
    pub fn con_eje(desde: NaiveTime, hasta: NaiveTime) -> Self {
        let (desde, hasta) = (alinear_franja(desde), alinear_franja(hasta));
        let (desde, hasta) = if hasta < desde { (hasta, desde) } else { (desde, hasta) };
        let franjas = eje(desde, hasta);
        let filas = vec![Fila::default(); franjas.len()];
        Grilla { franjas, filas, conflictos: Vec::new() }
    }

    /// Mismo eje, sin contenido ni conflictos.
    pub fn vaciar(&self) -> Self {
        Grilla {
            franjas: self.franjas.clone(),
            filas: vec![Fila::default(); self.franjas.len()],
            conflictos: Vec::new(),
        }
    }

    pub fn franjas(&self) -> &[NaiveTime] {
        &self.franjas
    }

    pub fn conflictos(&self) -> &[Conflicto] {
        &self.conflictos
    }

    pub fn hay_conflictos(&self) -> bool {
        !self.conflictos.is_empty()
    }

    fn indice(&self, hora: NaiveTime) -> Option<usize> {
        self.franjas.iter().position(|f| *f == hora)
    }

    /// Etiquetas ordenadas de una celda (vacío si la franja no está en el eje)
    pub fn etiquetas(&self, hora: NaiveTime, dia: Dia) -> Vec<&str> {
        match self.indice(hora) {
            Some(i) => self.filas[i][dia.indice()].iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    /// Texto de la celda: etiquetas ordenadas unidas con " / ".
    pub fn celda(&self, hora: NaiveTime, dia: Dia) -> String {
        self.etiquetas(hora, dia).join(SEPARADOR)
    }

    /// Filas de texto en orden del eje: (franja, celdas lunes..viernes)
    pub fn filas_texto(&self) -> Vec<(NaiveTime, [String; 5])> {
        self.franjas
            .iter()
            .zip(self.filas.iter())
            .map(|(h, fila)| {
                let celdas = std::array::from_fn(|d| {
                    fila[d].iter().map(String::as_str).collect::<Vec<_>>().join(SEPARADOR)
                });
                (*h, celdas)
            })
            .collect()
    }

    /// Amplía el eje a la unión con [desde, hasta] conservando las celdas.
    pub fn extender(&mut self, desde: NaiveTime, hasta: NaiveTime) {
        let (desde, hasta) = (alinear_franja(desde), alinear_franja(hasta));
        let (Some(min), Some(max)) = (self.franjas.first().copied(), self.franjas.last().copied()) else {
            *self = Grilla::con_eje(desde, hasta);
            return;
        };
        let nuevo_min = min.min(desde);
        let nuevo_max = max.max(hasta);
        if nuevo_min == min && nuevo_max == max {
            return;
        }
        let franjas = eje(nuevo_min, nuevo_max);
        let desplazamiento = ((minutos(min) - minutos(nuevo_min)) / MINUTOS_FRANJA as i64) as usize;
        let mut filas = vec![Fila::default(); franjas.len()];
        for (i, fila) in std::mem::take(&mut self.filas).into_iter().enumerate() {
            filas[i + desplazamiento] = fila;
        }
        tracing::debug!(
            "eje ampliado a {}-{} ({} franjas)",
            nuevo_min.format("%H:%M"),
            nuevo_max.format("%H:%M"),
            franjas.len()
        );
        self.franjas = franjas;
        self.filas = filas;
    }

    /// Índice de la franja; si no está en el eje se inserta en su sitio.
    fn asegurar_franja(&mut self, hora: NaiveTime) -> usize {
        if let Some(i) = self.indice(hora) {
            return i;
        }
        let i = self.franjas.partition_point(|f| *f < hora);
        tracing::debug!("franja {} insertada en el eje", hora.format("%H:%M"));
        self.franjas.insert(i, hora);
        self.filas.insert(i, Fila::default());
        i
    }

    /// Proyecta un bloque sobre su columna, ampliando el eje si hace falta.
    /// Una etiqueta distinta ya presente en la franja es un conflicto: se
    /// registra y se conservan ambas.
    pub fn colocar(&mut self, bloque: &Bloque, etiqueta: &str) {
        let franjas: BTreeSet<NaiveTime> = bloque.franjas().into_iter().map(alinear_franja).collect();
        let (Some(primera), Some(ultima)) = (franjas.first().copied(), franjas.last().copied()) else {
            return;
        };
        self.extender(primera, ultima);

        let col = bloque.dia.indice();
        for hora in franjas {
            let i = self.asegurar_franja(hora);
            let celda = &mut self.filas[i][col];
            if !celda.is_empty() && !celda.contains(etiqueta) {
                let existente = celda.iter().map(String::as_str).collect::<Vec<_>>().join(SEPARADOR);
                tracing::warn!(
                    "[Conflicto] {} / {} - {} {}",
                    etiqueta,
                    existente,
                    bloque.dia,
                    hora.format("%H:%M")
                );
                self.conflictos.push(Conflicto {
                    dia: bloque.dia,
                    hora,
                    existente,
                    nuevo: etiqueta.to_string(),
                });
            }
            celda.insert(etiqueta.to_string());
        }
    }
}

/// Recalcula la grilla de un horario desde cero sobre su eje actual.
pub fn calcular_grilla(horario: &Horario) -> Grilla {
    let mut grilla = horario.grilla().vaciar();
    for ramo in horario.ramos() {
        for bloque in &ramo.bloques {
            // Sólo se dibuja (y se comprueba) la sección elegida de cada tipo
            if ramo.seccion_elegida(bloque.tipo) != Some(bloque.seccion) {
                continue;
            }
            grilla.colocar(bloque, &ramo.etiqueta(bloque));
        }
    }
    grilla
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoClase;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_eje_inicial_una_franja() {
        let g = Grilla::default();
        assert_eq!(g.franjas(), &[hm(9, 0)]);
    }

    #[test]
    fn test_extender_conserva_celdas() {
        let mut g = Grilla::con_eje(hm(10, 0), hm(11, 0));
        let b = Bloque::new(1, Dia::Martes, hm(10, 0), hm(11, 0), "A", TipoClase::Expositiva).unwrap();
        g.colocar(&b, "AB E1");
        g.extender(hm(8, 0), hm(13, 30));
        assert_eq!(g.franjas().first(), Some(&hm(8, 0)));
        assert_eq!(g.franjas().last(), Some(&hm(13, 30)));
        assert_eq!(g.franjas().len(), 12);
        assert_eq!(g.celda(hm(10, 0), Dia::Martes), "AB E1");
        assert_eq!(g.celda(hm(10, 30), Dia::Martes), "AB E1");
        assert_eq!(g.celda(hm(11, 0), Dia::Martes), "");
    }

    #[test]
    fn test_bloque_fuera_de_grilla_no_se_pierde() {
        let mut g = Grilla::con_eje(hm(9, 0), hm(9, 0));
        // campos públicos: se puede construir sin pasar por `Bloque::new`
        let b = Bloque {
            seccion: 1,
            dia: Dia::Viernes,
            inicio: hm(10, 15),
            fin: hm(11, 15),
            aula: "A".into(),
            tipo: TipoClase::Seminario,
        };
        g.colocar(&b, "AB S1");
        assert_eq!(g.celda(hm(10, 0), Dia::Viernes), "AB S1");
        assert_eq!(g.celda(hm(10, 30), Dia::Viernes), "AB S1");
        assert!(g.franjas().iter().all(|f| crate::models::hora_alineada(*f)));
    }

    #[test]
    fn test_misma_etiqueta_no_es_conflicto() {
        let mut g = Grilla::default();
        let b = Bloque::new(1, Dia::Lunes, hm(9, 0), hm(10, 0), "A", TipoClase::Expositiva).unwrap();
        g.colocar(&b, "AB E1");
        g.colocar(&b, "AB E1");
        assert!(!g.hay_conflictos());
        assert_eq!(g.celda(hm(9, 30), Dia::Lunes), "AB E1");
    }

    #[test]
    fn test_conflicto_registrado() {
        let mut g = Grilla::default();
        let a = Bloque::new(1, Dia::Jueves, hm(9, 0), hm(10, 0), "A", TipoClase::Expositiva).unwrap();
        let b = Bloque::new(2, Dia::Jueves, hm(9, 30), hm(10, 30), "B", TipoClase::Interactiva).unwrap();
        g.colocar(&a, "ZZ E1");
        g.colocar(&b, "AA I2");
        assert_eq!(g.conflictos().len(), 1);
        let c = &g.conflictos()[0];
        assert_eq!((c.dia, c.hora), (Dia::Jueves, hm(9, 30)));
        assert_eq!(c.existente, "ZZ E1");
        assert_eq!(c.nuevo, "AA I2");
        assert_eq!(g.celda(hm(9, 30), Dia::Jueves), "AA I2 / ZZ E1");
    }
}
