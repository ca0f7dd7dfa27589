// Motor del horario: grilla, selección de ramos/secciones y búsqueda.
pub mod busqueda;
pub mod grilla;
pub mod horario;

pub use busqueda::{buscar_ramos, ramos_disponibles};
pub use grilla::{calcular_grilla, Conflicto, Grilla, SEPARADOR};
pub use horario::{ajustar_seccion, Horario, ResumenRamo};
