// Volcado CSV de la grilla cruda (todas las franjas del eje, sin colapsar).
use crate::algorithm::Grilla;
use crate::error::HorarioError;
use crate::models::Dia;

pub fn a_csv(grilla: &Grilla) -> Result<String, HorarioError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut cabecera = vec!["hora".to_string()];
    cabecera.extend(Dia::TODOS.iter().map(|d| d.etiqueta().to_string()));
    wtr.write_record(&cabecera)?;

    for (hora, celdas) in grilla.filas_texto() {
        let mut registro = vec![hora.format("%H:%M").to_string()];
        registro.extend(celdas);
        wtr.write_record(&registro)?;
    }

    let bytes = wtr.into_inner().map_err(|e| HorarioError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
