// Lectura de las filas de texto extraídas de las páginas del catálogo.
//
// Formatos esperados (una celda por campo):
//   hora:     "09:00-10:30"
//   grupo:    "Clase expositiva CLE_01"  (último token: CODIGO_NN)
//   aula:     "Aula 3 Edificio A"        (último token)
//   examen:   "12.01.2024 10:00-13:00"
//   cabecera: "1º Curso | 2º cuatrimestre | Obligatorio | 6 ECTS"

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::HorarioError;
use crate::models::{Bloque, Categoria, Dia, TipoClase};

/// Fila de la tabla de clases de un ramo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaSesion {
    pub dia: String,
    pub hora: String,
    pub grupo: String,
    pub aula: String,
}

/// Fila de la tabla de exámenes de un ramo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaExamen {
    pub fecha: String,
    pub aula: String,
}

fn hora(s: &str) -> Result<NaiveTime, HorarioError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| HorarioError::InvalidSession(format!("hora '{}' inválida: {}", s.trim(), e)))
}

/// "HH:MM-HH:MM" -> (inicio, fin)
pub fn parsear_rango(s: &str) -> Result<(NaiveTime, NaiveTime), HorarioError> {
    let partes: Vec<&str> = s.split('-').collect();
    if partes.len() != 2 {
        return Err(HorarioError::InvalidSession(format!("rango horario '{}' inválido", s)));
    }
    Ok((hora(partes[0])?, hora(partes[1])?))
}

/// Último token de la celda de grupo, p.ej. "CLIL_02" -> (Interactiva, 2).
pub fn parsear_grupo(s: &str) -> Result<(TipoClase, u32), HorarioError> {
    let token = s
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric());
    let Some((codigo, numero)) = token.split_once('_') else {
        return Err(HorarioError::UnrecognizedSessionType(token.to_string()));
    };
    let tipo = TipoClase::desde_codigo(codigo)?;
    let seccion = numero
        .parse::<u32>()
        .map_err(|_| HorarioError::InvalidSession(format!("grupo '{}' no numérico", numero)))?;
    Ok((tipo, seccion))
}

pub fn parsear_aula(s: &str) -> String {
    s.split_whitespace().last().unwrap_or("").to_string()
}

/// Fecha de inicio de un examen; la hora de fin se descarta.
pub fn parsear_fecha_examen(s: &str) -> Result<NaiveDateTime, HorarioError> {
    let inicio = s.split('-').next().unwrap_or("").trim();
    NaiveDateTime::parse_from_str(inicio, "%d.%m.%Y %H:%M")
        .map_err(|e| HorarioError::Parse(format!("fecha de examen '{}' inválida: {}", s.trim(), e)))
}

/// Cabecera del ramo -> (curso, cuatrimestre, categoría). Un cuatrimestre
/// no numérico ("Anual") se lee como 0.
pub fn parsear_cabecera(s: &str) -> Result<(u8, u8, Categoria), HorarioError> {
    let partes: Vec<&str> = s.split('|').map(str::trim).collect();
    if partes.len() < 3 {
        return Err(HorarioError::Parse(format!("cabecera de ramo '{}' incompleta", s)));
    }
    let curso = partes[0]
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| HorarioError::Parse(format!("curso '{}' inválido", partes[0])))? as u8;
    let cuatrimestre = partes[1].chars().next().and_then(|c| c.to_digit(10)).unwrap_or(0) as u8;
    let categoria = Categoria::desde_etiqueta(partes[2])?;
    Ok((curso, cuatrimestre, categoria))
}

pub fn bloque_desde_fila(fila: &FilaSesion) -> Result<Bloque, HorarioError> {
    let dia = Dia::desde_etiqueta(&fila.dia)?;
    let (inicio, fin) = parsear_rango(&fila.hora)?;
    let (tipo, seccion) = parsear_grupo(&fila.grupo)?;
    Bloque::new(seccion, dia, inicio, fin, parsear_aula(&fila.aula), tipo)
}
