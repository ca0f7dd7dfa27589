//! Horario: ramos incluidos, sección elegida por tipo y la grilla derivada.
//!
//! Toda mutación termina en `reconstruir()`, que sustituye la grilla por
//! `calcular_grilla(self)`.

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::HorarioError;
use crate::models::{Ramo, TipoClase};
use super::grilla::{calcular_grilla, Grilla};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Horario {
    ramos: BTreeMap<String, Ramo>,
    grilla: Grilla,
}

/// Fila de la tabla lateral: ramo, abreviatura y sección por tipo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumenRamo {
    pub nombre: String,
    pub abreviatura: String,
    pub secciones: BTreeMap<TipoClase, u32>,
    pub num_secciones: BTreeMap<TipoClase, u32>,
}

impl Horario {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horario vacío con el eje inicial [desde, hasta].
    pub fn con_eje(desde: NaiveTime, hasta: NaiveTime) -> Self {
        Horario { ramos: BTreeMap::new(), grilla: Grilla::con_eje(desde, hasta) }
    }

    /// Horario con todos los ramos de un curso que se imparten en el
    /// cuatrimestre indicado (los anuales siempre entran).
    pub fn de_curso(catalogo: &[Ramo], curso: u8, cuatrimestre: u8) -> Self {
        let mut h = Horario::new();
        h.cargar_curso(catalogo, curso, cuatrimestre);
        h
    }

    /// Como `de_curso`, pero conservando el eje de este horario.
    pub fn cargar_curso(&mut self, catalogo: &[Ramo], curso: u8, cuatrimestre: u8) {
        self.ramos = catalogo
            .iter()
            .filter(|r| r.curso == curso && r.se_imparte_en(cuatrimestre))
            .map(|r| (r.nombre.clone(), r.clone()))
            .collect();
        tracing::info!("horario de {}º curso, cuatrimestre {}: {} ramos", curso, cuatrimestre, self.ramos.len());
        self.reconstruir();
    }

    pub fn grilla(&self) -> &Grilla {
        &self.grilla
    }

    /// Ramos en orden de nombre
    pub fn ramos(&self) -> impl Iterator<Item = &Ramo> {
        self.ramos.values()
    }

    pub fn ramo(&self, nombre: &str) -> Option<&Ramo> {
        self.ramos.get(nombre)
    }

    pub fn contiene(&self, nombre: &str) -> bool {
        self.ramos.contains_key(nombre)
    }

    pub fn len(&self) -> usize {
        self.ramos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ramos.is_empty()
    }

    pub fn reconstruir(&mut self) {
        self.grilla = calcular_grilla(self);
    }

    /// Añade el ramo si su nombre no está; las secciones elegidas del ramo
    /// se usan tal cual. Reconstruye siempre.
    pub fn agregar_ramo(&mut self, ramo: Ramo) {
        if self.ramos.contains_key(&ramo.nombre) {
            tracing::debug!("'{}' ya estaba en el horario", ramo.nombre);
        } else {
            self.ramos.insert(ramo.nombre.clone(), ramo);
        }
        self.reconstruir();
    }

    pub fn quitar_ramo(&mut self, nombre: &str) -> Result<Ramo, HorarioError> {
        let ramo = self
            .ramos
            .remove(nombre)
            .ok_or_else(|| HorarioError::NotFound(nombre.to_string()))?;
        self.reconstruir();
        Ok(ramo)
    }

    /// Cambia la sección de un tipo de clase en un ramo. Devuelve la
    /// sección finalmente guardada (ver `ajustar_seccion`).
    pub fn elegir_seccion(&mut self, nombre: &str, tipo: TipoClase, seccion: u32) -> Result<u32, HorarioError> {
        let ramo = self
            .ramos
            .get_mut(nombre)
            .ok_or_else(|| HorarioError::NotFound(nombre.to_string()))?;
        let guardada = ajustar_seccion(ramo, tipo, seccion);
        ramo.secciones_elegidas.insert(tipo, guardada);
        self.reconstruir();
        Ok(guardada)
    }

    /// Cambia la sección de un tipo en todos los ramos del curso que tengan
    /// ese tipo de clase. Devuelve cuántos ramos cambiaron.
    pub fn elegir_seccion_curso(&mut self, curso: u8, tipo: TipoClase, seccion: u32) -> usize {
        let mut cambiados = 0;
        for ramo in self.ramos.values_mut().filter(|r| r.curso == curso) {
            if !ramo.secciones_elegidas.contains_key(&tipo) {
                continue;
            }
            let guardada = ajustar_seccion(ramo, tipo, seccion);
            if ramo.secciones_elegidas.insert(tipo, guardada) != Some(guardada) {
                cambiados += 1;
            }
        }
        self.reconstruir();
        cambiados
    }

    /// Máximo de secciones por tipo entre los ramos del horario (para
    /// dimensionar los selectores de grupo).
    pub fn max_secciones(&self) -> BTreeMap<TipoClase, u32> {
        let mut out: BTreeMap<TipoClase, u32> = BTreeMap::new();
        for ramo in self.ramos.values() {
            for (tipo, n) in &ramo.num_secciones {
                let e = out.entry(*tipo).or_insert(0);
                *e = (*e).max(*n);
            }
        }
        out
    }

    pub fn resumen(&self) -> Vec<ResumenRamo> {
        self.ramos
            .values()
            .map(|r| ResumenRamo {
                nombre: r.nombre.clone(),
                abreviatura: r.abreviatura.clone(),
                secciones: r.secciones_elegidas.clone(),
                num_secciones: r.num_secciones.clone(),
            })
            .collect()
    }
}

/// Política única de secciones: un grupo mayor que el número conocido de
/// grupos del tipo se reduce a ese número; sin número conocido (o con 0)
/// se guarda tal cual.
pub fn ajustar_seccion(ramo: &Ramo, tipo: TipoClase, pedida: u32) -> u32 {
    match ramo.num_secciones.get(&tipo) {
        Some(&max) if max > 0 && pedida > max => {
            tracing::debug!("'{}' {}: grupo {} ajustado a {}", ramo.nombre, tipo, pedida, max);
            max
        }
        _ => pedida,
    }
}
