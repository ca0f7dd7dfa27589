// Configuración por variables de entorno (con `.env` opcional).
use chrono::NaiveTime;
use std::env;
use std::path::PathBuf;

pub const CATALOGO_POR_DEFECTO: &str = "materias.json";
pub const SESIONES_DIR_POR_DEFECTO: &str = "sesiones";
pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// ARMAHORARIO_CATALOGO
    pub catalogo: PathBuf,
    /// ARMAHORARIO_SESIONES_DIR
    pub sesiones_dir: PathBuf,
    /// ARMAHORARIO_BIND
    pub bind: String,
    /// ARMAHORARIO_HORA_INICIO / ARMAHORARIO_HORA_FIN
    pub eje_inicial: (NaiveTime, NaiveTime),
}

impl Default for Config {
    fn default() -> Self {
        let h = crate::algorithm::grilla::hora_placeholder();
        Config {
            catalogo: PathBuf::from(CATALOGO_POR_DEFECTO),
            sesiones_dir: PathBuf::from(SESIONES_DIR_POR_DEFECTO),
            bind: BIND_POR_DEFECTO.to_string(),
            eje_inicial: (h, h),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero leyendo de una función (para pruebas).
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(get: F) -> Self {
        let mut cfg = Config::default();
        if let Some(v) = get("ARMAHORARIO_CATALOGO").filter(|v| !v.trim().is_empty()) {
            cfg.catalogo = PathBuf::from(v);
        }
        if let Some(v) = get("ARMAHORARIO_SESIONES_DIR").filter(|v| !v.trim().is_empty()) {
            cfg.sesiones_dir = PathBuf::from(v);
        }
        if let Some(v) = get("ARMAHORARIO_BIND").filter(|v| !v.trim().is_empty()) {
            cfg.bind = v;
        }
        let inicio = leer_hora(&get, "ARMAHORARIO_HORA_INICIO").unwrap_or(cfg.eje_inicial.0);
        let fin = leer_hora(&get, "ARMAHORARIO_HORA_FIN").unwrap_or(inicio);
        cfg.eje_inicial = (inicio, fin.max(inicio));
        cfg
    }
}

fn leer_hora<F: Fn(&str) -> Option<String>>(get: &F, clave: &str) -> Option<NaiveTime> {
    let v = get(clave)?;
    match NaiveTime::parse_from_str(v.trim(), "%H:%M") {
        Ok(h) if crate::models::hora_alineada(h) => Some(h),
        _ => {
            tracing::warn!("{}='{}' no es una hora HH:MM en la grilla de 30 min; se ignora", clave, v);
            None
        }
    }
}
