// Tabla HTML para incrustar en la interfaz.
use std::fmt::Write;

use super::{GrillaRenderizada, FONDO_CABECERA};
use crate::models::Dia;

const ESTILO_TEXTO: &str = "color: black; text-align: center";

impl GrillaRenderizada {
    pub fn a_html(&self) -> String {
        let th = format!("background: {}; {}", FONDO_CABECERA, ESTILO_TEXTO);
        let mut html = String::from("<table class=\"horario\" border=\"0\">\n<thead>\n<tr>");
        let _ = write!(html, "<th style=\"{}\"></th>", th);
        for dia in Dia::TODOS {
            let _ = write!(html, "<th style=\"{}\">{}</th>", th, html_escape::encode_text(dia.etiqueta()));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for fila in &self.filas {
            let mut th_fila = th.clone();
            if fila.separador {
                th_fila.push_str("; border-bottom: 2px solid black");
            }
            let _ = write!(html, "<tr><th style=\"{}\">{}</th>", th_fila, fila.hora.format("%H:%M"));
            for celda in &fila.celdas {
                let _ = write!(
                    html,
                    "<td style=\"{}; {}\">{}</td>",
                    html_escape::encode_double_quoted_attribute(&celda.estilo.css()),
                    ESTILO_TEXTO,
                    html_escape::encode_text(&celda.texto)
                );
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::super::{CeldaRenderizada, EstiloCelda, FilaRenderizada};
    use super::*;
    use chrono::NaiveTime;
    use std::collections::BTreeMap;

    fn celda(texto: &str) -> CeldaRenderizada {
        CeldaRenderizada {
            texto: texto.to_string(),
            estilo: EstiloCelda { fondo: "#fff6eb".into(), cursiva: false, negrita: false, borde_inferior: false },
        }
    }

    #[test]
    fn test_texto_escapado() {
        let render = GrillaRenderizada {
            filas: vec![FilaRenderizada {
                hora: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                celdas: [celda("I&D <b>"), celda(""), celda(""), celda(""), celda("")],
                separador: false,
            }],
            colores: BTreeMap::new(),
        };
        let html = render.a_html();
        assert!(html.contains(">I&amp;D &lt;b&gt;</td>"));
        assert!(!html.contains("<b>"));
    }
}
