// Estructuras de datos principales: ramos, bloques de clase y exámenes.

mod tipos;

pub use tipos::{Categoria, Dia, TipoClase};

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::HorarioError;

/// Granularidad de la grilla en minutos
pub const MINUTOS_FRANJA: u32 = 30;

/// True si la hora cae exactamente en una franja de 30 minutos
pub fn hora_alineada(t: NaiveTime) -> bool {
    t.minute() % MINUTOS_FRANJA == 0 && t.second() == 0 && t.nanosecond() == 0
}

/// Quita tildes, diéresis y la virgulilla de la ñ, respetando mayúsculas.
pub fn sin_tildes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' => 'a',
            'é' | 'è' => 'e',
            'í' | 'ì' => 'i',
            'ó' | 'ò' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            'Á' | 'À' => 'A',
            'É' | 'È' => 'E',
            'Í' | 'Ì' => 'I',
            'Ó' | 'Ò' => 'O',
            'Ú' | 'Ù' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Redondea hacia abajo al inicio de su franja de 30 minutos.
pub fn alinear_franja(t: NaiveTime) -> NaiveTime {
    let minuto = t.minute() - t.minute() % MINUTOS_FRANJA;
    NaiveTime::from_hms_opt(t.hour(), minuto, 0).unwrap_or(t)
}

/// Un bloque semanal de clase: día + rango horario + aula + tipo + grupo.
///
/// `seccion` es el número de grupo (1-based; 0 para optativos de grupo único).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bloque {
    pub seccion: u32,
    pub dia: Dia,
    pub inicio: NaiveTime,
    pub fin: NaiveTime,
    pub aula: String,
    pub tipo: TipoClase,
}

impl Bloque {
    pub fn new(
        seccion: u32,
        dia: Dia,
        inicio: NaiveTime,
        fin: NaiveTime,
        aula: impl Into<String>,
        tipo: TipoClase,
    ) -> Result<Self, HorarioError> {
        let b = Bloque { seccion, dia, inicio, fin, aula: aula.into(), tipo };
        b.validar()?;
        Ok(b)
    }

    /// Comprueba inicio < fin y que ambas horas estén en la grilla de 30 min.
    pub fn validar(&self) -> Result<(), HorarioError> {
        if self.inicio >= self.fin {
            return Err(HorarioError::InvalidSession(format!(
                "{} {}-{}: el inicio debe ser anterior al fin",
                self.dia,
                self.inicio.format("%H:%M"),
                self.fin.format("%H:%M")
            )));
        }
        if !hora_alineada(self.inicio) || !hora_alineada(self.fin) {
            return Err(HorarioError::InvalidSession(format!(
                "{} {}-{}: horas fuera de la grilla de {} minutos",
                self.dia,
                self.inicio.format("%H:%M"),
                self.fin.format("%H:%M"),
                MINUTOS_FRANJA
            )));
        }
        Ok(())
    }

    /// Franjas [inicio, fin) que ocupa el bloque, de 30 en 30 minutos.
    pub fn franjas(&self) -> Vec<NaiveTime> {
        let paso = chrono::Duration::minutes(MINUTOS_FRANJA as i64);
        let mut out = Vec::new();
        let mut t = self.inicio;
        while t < self.fin {
            out.push(t);
            let (sig, vuelta) = t.overflowing_add_signed(paso);
            if vuelta != 0 {
                break;
            }
            t = sig;
        }
        out
    }
}

/// Fecha de examen. Un ramo tiene un registro por fecha-hora distinta; las
/// aulas de la misma convocatoria se acumulan en el conjunto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examen {
    pub fecha: NaiveDateTime,
    #[serde(default)]
    pub aulas: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ramo {
    pub nombre: String,
    pub abreviatura: String,
    pub enlace: String,
    pub curso: u8,
    /// 0 = anual
    pub cuatrimestre: u8,
    pub categoria: Categoria,
    #[serde(default)]
    pub bloques: Vec<Bloque>,
    #[serde(default)]
    pub examenes: Vec<Examen>,
    /// Grupo elegido por tipo de clase
    #[serde(default)]
    pub secciones_elegidas: BTreeMap<TipoClase, u32>,
    /// Número de grupos conocidos por tipo de clase
    #[serde(default)]
    pub num_secciones: BTreeMap<TipoClase, u32>,
}

impl Ramo {
    pub fn new(
        nombre: impl Into<String>,
        enlace: impl Into<String>,
        curso: u8,
        cuatrimestre: u8,
        categoria: Categoria,
    ) -> Self {
        let nombre = nombre.into();
        Ramo {
            abreviatura: abreviar(&nombre),
            nombre,
            enlace: enlace.into(),
            curso,
            cuatrimestre,
            categoria,
            bloques: Vec::new(),
            examenes: Vec::new(),
            secciones_elegidas: BTreeMap::new(),
            num_secciones: BTreeMap::new(),
        }
    }

    pub fn es_anual(&self) -> bool {
        self.cuatrimestre == 0
    }

    /// True si el ramo se imparte en el cuatrimestre indicado (los anuales siempre)
    pub fn se_imparte_en(&self, cuatrimestre: u8) -> bool {
        self.es_anual() || self.cuatrimestre == cuatrimestre
    }

    pub fn seccion_elegida(&self, tipo: TipoClase) -> Option<u32> {
        self.secciones_elegidas.get(&tipo).copied()
    }

    /// Etiqueta de un bloque en la grilla: "{abreviatura} {letra}{grupo}"
    pub fn etiqueta(&self, bloque: &Bloque) -> String {
        format!("{} {}{}", self.abreviatura, bloque.tipo.letra(), bloque.seccion)
    }

    /// Registra una convocatoria; si ya existe la fecha sólo se añade el aula.
    pub fn agregar_examen(&mut self, fecha: NaiveDateTime, aula: impl Into<String>) {
        let aula = aula.into();
        match self.examenes.iter_mut().find(|e| e.fecha == fecha) {
            Some(existente) => {
                existente.aulas.insert(aula);
            }
            None => self.examenes.push(Examen { fecha, aulas: BTreeSet::from([aula]) }),
        }
    }

    /// Recalcula `num_secciones` como el grupo máximo visto por tipo.
    pub fn recalcular_num_secciones(&mut self) {
        self.num_secciones.clear();
        for b in &self.bloques {
            let n = self.num_secciones.entry(b.tipo).or_insert(0);
            *n = (*n).max(b.seccion);
        }
    }

    /// Asigna el grupo por defecto de la categoría a cada tipo con bloques.
    pub fn aplicar_secciones_por_defecto(&mut self) {
        let defecto = self.categoria.seccion_por_defecto();
        self.secciones_elegidas = self.num_secciones.keys().map(|t| (*t, defecto)).collect();
    }
}

/// Abreviatura de un nombre: sus letras mayúsculas en orden.
pub fn abreviar(nombre: &str) -> String {
    nombre.chars().filter(|c| c.is_uppercase()).collect()
}
