use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use chrono::NaiveTime;
use serde_json::json;
use std::collections::HashMap;

use crate::algorithm::buscar_ramos;
use crate::api_json::{construir_horario, parse_json_input, responder, SolicitudHorario};
use crate::error::HorarioError;
use crate::models::Ramo;

/// Estado compartido de sólo lectura: el catálogo se carga una vez y cada
/// petición construye su propio `Horario`.
#[derive(Debug, Clone)]
pub struct EstadoApp {
    pub catalogo: Vec<Ramo>,
    pub eje_inicial: (NaiveTime, NaiveTime),
}

fn respuesta_error(e: &HorarioError) -> HttpResponse {
    match e {
        HorarioError::NotFound(_) => HttpResponse::NotFound().json(json!({"error": e.to_string()})),
        _ => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// GET /catalogo/buscar?q=texto
/// Devuelve los 5 ramos más parecidos a `q`.
async fn buscar_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let q = match query.get("q").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(q) => q.to_string(),
        None => return HttpResponse::BadRequest().json(json!({"error": "q query parameter is required"})),
    };
    let resultados: Vec<serde_json::Value> = buscar_ramos(&estado.catalogo, &q)
        .into_iter()
        .map(|(r, score)| {
            json!({
                "nombre": r.nombre,
                "abreviatura": r.abreviatura,
                "curso": r.curso,
                "cuatrimestre": r.cuatrimestre,
                "score": score
            })
        })
        .collect();
    HttpResponse::Ok().json(json!({"resultados": resultados}))
}

/// POST /horario
/// Construye el horario pedido (ver `SolicitudHorario`) y devuelve la
/// tabla HTML, el CSV, los conflictos y el resumen de secciones.
async fn horario_handler(estado: web::Data<EstadoApp>, body: web::Json<serde_json::Value>) -> impl Responder {
    let body_value = body.into_inner();
    let json_str = match serde_json::to_string(&body_value) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})),
    };
    let sol = match parse_json_input(&json_str) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };

    let horario = match construir_horario(&estado.catalogo, &sol, estado.eje_inicial) {
        Ok(h) => h,
        Err(e) => return respuesta_error(&e),
    };
    match responder(&estado.catalogo, &horario, sol.cuatrimestre.unwrap_or(1)) {
        Ok(r) => HttpResponse::Ok().json(r),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}

async fn help_handler() -> impl Responder {
    let mut example = SolicitudHorario {
        curso: Some(2),
        cuatrimestre: Some(1),
        ramos: vec!["Redes de Computadoras".to_string()],
        ..Default::default()
    };
    example.secciones_curso.insert("CLIL".to_string(), 2);

    HttpResponse::Ok().json(json!({
        "description": "API para armar horarios. POST /horario recibe la selección de ramos y grupos y devuelve la grilla (HTML y CSV) con sus conflictos. GET /catalogo/buscar?q= busca ramos por nombre.",
        "post_example": example,
        "tipos_clase": ["CLE", "CLIL", "CLIS"],
        "get_example_query": "/catalogo/buscar?q=redes"
    }))
}

/// Registra las rutas; separado de `run_server` para poder probarlas.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalogo/buscar", web::get().to(buscar_handler))
        .route("/horario", web::post().to(horario_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, estado: EstadoApp) -> std::io::Result<()> {
    tracing::info!("servidor en http://{} ({} ramos en catálogo)", bind_addr, estado.catalogo.len());
    let data = web::Data::new(estado);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configurar)
    })
    .bind(bind_addr)?
    .run()
    .await
}
