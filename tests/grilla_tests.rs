use armahorario::algorithm::{calcular_grilla, Horario};
use armahorario::logging;
use armahorario::models::{Bloque, Categoria, Dia, Ramo, TipoClase};
use chrono::NaiveTime;

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn bloque(seccion: u32, dia: Dia, desde: (u32, u32), hasta: (u32, u32), tipo: TipoClase) -> Bloque {
    Bloque::new(seccion, dia, hm(desde.0, desde.1), hm(hasta.0, hasta.1), "Aula 1", tipo).unwrap()
}

fn ramo(nombre: &str, categoria: Categoria, bloques: Vec<Bloque>) -> Ramo {
    let mut r = Ramo::new(nombre, "https://example.org/ramo", 1, 1, categoria);
    r.bloques = bloques;
    r.recalcular_num_secciones();
    r.aplicar_secciones_por_defecto();
    r
}

fn matematicas() -> Ramo {
    ramo(
        "Matemáticas Avanzadas",
        Categoria::Obligatoria,
        vec![bloque(1, Dia::Lunes, (9, 0), (10, 30), TipoClase::Expositiva)],
    )
}

fn fisica() -> Ramo {
    ramo(
        "Física Intermedia",
        Categoria::Obligatoria,
        vec![bloque(1, Dia::Lunes, (9, 30), (10, 0), TipoClase::Expositiva)],
    )
}

#[test]
fn test_conflicto_ma_fi() {
    logging::init_test();
    let mut h = Horario::new();
    h.agregar_ramo(matematicas());
    h.agregar_ramo(fisica());

    let g = h.grilla();
    assert_eq!(g.celda(hm(9, 30), Dia::Lunes), "FI E1 / MA E1");
    assert_eq!(g.celda(hm(9, 0), Dia::Lunes), "MA E1");
    assert_eq!(g.celda(hm(10, 0), Dia::Lunes), "MA E1");
    assert_eq!(g.celda(hm(9, 30), Dia::Martes), "");
    assert_eq!(g.conflictos().len(), 1);
    assert_eq!(g.conflictos()[0].hora, hm(9, 30));
}

#[test]
fn test_quitar_ramo_vacia_sus_celdas() {
    let mut h = Horario::new();
    h.agregar_ramo(matematicas());
    h.agregar_ramo(fisica());

    let quitado = h.quitar_ramo("Matemáticas Avanzadas").expect("el ramo estaba");
    assert_eq!(quitado.abreviatura, "MA");
    let g = h.grilla();
    assert_eq!(g.celda(hm(9, 0), Dia::Lunes), "");
    assert_eq!(g.celda(hm(10, 0), Dia::Lunes), "");
    assert_eq!(g.celda(hm(9, 30), Dia::Lunes), "FI E1");
    assert!(!g.hay_conflictos());
    // el eje no se encoge
    assert_eq!(g.franjas(), &[hm(9, 0), hm(9, 30), hm(10, 0)]);
}

#[test]
fn test_reconstruir_es_idempotente() {
    let mut h = Horario::new();
    h.agregar_ramo(matematicas());
    h.agregar_ramo(fisica());
    let antes = h.grilla().clone();
    h.reconstruir();
    assert_eq!(h.grilla(), &antes);
    h.reconstruir();
    assert_eq!(h.grilla(), &antes);
    assert_eq!(calcular_grilla(&h), antes);
}

#[test]
fn test_orden_de_insercion_no_importa() {
    let extra = ramo(
        "Álgebra Lineal",
        Categoria::FormacionBasica,
        vec![bloque(1, Dia::Lunes, (9, 0), (11, 0), TipoClase::Expositiva)],
    );

    let mut a = Horario::new();
    a.agregar_ramo(matematicas());
    a.agregar_ramo(fisica());
    a.agregar_ramo(extra.clone());

    let mut b = Horario::new();
    b.agregar_ramo(extra);
    b.agregar_ramo(fisica());
    b.agregar_ramo(matematicas());

    assert_eq!(a.grilla().filas_texto(), b.grilla().filas_texto());
    assert_eq!(a.grilla().celda(hm(9, 30), Dia::Lunes), "FI E1 / MA E1 / ÁL E1");
}

#[test]
fn test_solo_se_dibuja_la_seccion_elegida() {
    let redes = ramo(
        "Redes",
        Categoria::Obligatoria,
        vec![
            bloque(1, Dia::Martes, (9, 0), (10, 0), TipoClase::Expositiva),
            bloque(1, Dia::Miercoles, (11, 0), (12, 0), TipoClase::Interactiva),
            bloque(2, Dia::Miercoles, (11, 0), (12, 0), TipoClase::Interactiva),
            bloque(3, Dia::Jueves, (15, 0), (16, 0), TipoClase::Interactiva),
        ],
    );
    let mut h = Horario::new();
    h.agregar_ramo(redes);

    let g = h.grilla();
    // I1 e I2 coinciden en hora pero I2 no está elegido: no hay conflicto
    assert!(!g.hay_conflictos());
    assert_eq!(g.celda(hm(11, 0), Dia::Miercoles), "R I1");
    assert_eq!(g.celda(hm(15, 0), Dia::Jueves), "");

    h.elegir_seccion("Redes", TipoClase::Interactiva, 3).unwrap();
    let g = h.grilla();
    assert_eq!(g.celda(hm(11, 0), Dia::Miercoles), "");
    assert_eq!(g.celda(hm(15, 0), Dia::Jueves), "R I3");
    assert_eq!(g.celda(hm(9, 0), Dia::Martes), "R E1");
}

#[test]
fn test_eje_crece_sin_perder_celdas() {
    let mut h = Horario::new();
    h.agregar_ramo(matematicas());
    let tarde = ramo(
        "Programación",
        Categoria::Obligatoria,
        vec![bloque(1, Dia::Viernes, (18, 0), (19, 0), TipoClase::Seminario)],
    );
    let temprano = ramo(
        "Cálculo",
        Categoria::FormacionBasica,
        vec![bloque(1, Dia::Jueves, (8, 0), (8, 30), TipoClase::Expositiva)],
    );
    h.agregar_ramo(tarde);
    h.agregar_ramo(temprano);

    let g = h.grilla();
    assert_eq!(g.franjas().first(), Some(&hm(8, 0)));
    assert_eq!(g.franjas().last(), Some(&hm(18, 30)));
    assert_eq!(g.celda(hm(9, 0), Dia::Lunes), "MA E1");
    assert_eq!(g.celda(hm(10, 0), Dia::Lunes), "MA E1");
    assert_eq!(g.celda(hm(18, 30), Dia::Viernes), "P S1");
    assert_eq!(g.celda(hm(8, 0), Dia::Jueves), "C E1");
    assert_eq!(g.celda(hm(19, 0), Dia::Viernes), "");
}

#[test]
fn test_agregar_dos_veces_no_duplica() {
    let mut h = Horario::new();
    h.agregar_ramo(matematicas());
    let mut otra = matematicas();
    otra.secciones_elegidas.insert(TipoClase::Expositiva, 7);
    h.agregar_ramo(otra);
    assert_eq!(h.len(), 1);
    // se conserva la versión ya presente
    assert_eq!(h.ramo("Matemáticas Avanzadas").unwrap().seccion_elegida(TipoClase::Expositiva), Some(1));
    assert!(!h.grilla().hay_conflictos());
}

#[test]
fn test_eje_desalineado_se_redondea() {
    let mut h = Horario::con_eje(hm(9, 15), hm(9, 15));
    assert_eq!(h.grilla().franjas(), &[hm(9, 0)]);
    h.agregar_ramo(ramo(
        "Matemáticas Avanzadas",
        Categoria::Obligatoria,
        vec![bloque(1, Dia::Lunes, (10, 0), (11, 0), TipoClase::Expositiva)],
    ));
    let g = h.grilla();
    assert_eq!(g.franjas(), &[hm(9, 0), hm(9, 30), hm(10, 0), hm(10, 30)]);
    assert_eq!(g.celda(hm(10, 0), Dia::Lunes), "MA E1");
    assert_eq!(g.celda(hm(10, 30), Dia::Lunes), "MA E1");
}
