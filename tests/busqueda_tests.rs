use armahorario::algorithm::{buscar_ramos, ramos_disponibles, Horario};
use armahorario::algorithm::busqueda::MAX_RESULTADOS;
use armahorario::models::{Categoria, Ramo};

fn catalogo() -> Vec<Ramo> {
    vec![
        Ramo::new("Bases de Datos", "", 2, 1, Categoria::Obligatoria),
        Ramo::new("Redes de Computadoras", "", 3, 1, Categoria::Obligatoria),
        Ramo::new("Física", "", 1, 1, Categoria::FormacionBasica),
        Ramo::new("Redes Neuronales", "", 4, 2, Categoria::Optativa),
        Ramo::new("Química", "", 1, 2, Categoria::FormacionBasica),
        Ramo::new("Cálculo", "", 1, 1, Categoria::FormacionBasica),
        Ramo::new("Compiladores", "", 3, 2, Categoria::Obligatoria),
    ]
}

#[test]
fn test_subcadena_va_primero() {
    let cat = catalogo();
    let res = buscar_ramos(&cat, "Redes");
    assert_eq!(res.len(), MAX_RESULTADOS);
    assert_eq!(res[0].0.nombre, "Redes Neuronales");
    assert_eq!(res[1].0.nombre, "Redes de Computadoras");
    assert!(res[0].1 > 100.0);
    assert!(res[2].1 < 100.0);
    // orden descendente
    assert!(res.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn test_coincidencia_exacta() {
    let cat = catalogo();
    let res = buscar_ramos(&cat, "Física");
    assert_eq!(res[0].0.nombre, "Física");
    assert!((res[0].1 - 200.0).abs() < 1e-9);
}

#[test]
fn test_empates_conservan_orden() {
    let cat = vec![
        Ramo::new("Taller", "", 1, 1, Categoria::Optativa),
        Ramo::new("Taller", "", 2, 1, Categoria::Optativa),
        Ramo::new("Taller", "", 3, 1, Categoria::Optativa),
    ];
    let res = buscar_ramos(&cat, "Taller");
    let cursos: Vec<u8> = res.iter().map(|(r, _)| r.curso).collect();
    assert_eq!(cursos, vec![1, 2, 3]);
}

#[test]
fn test_catalogo_corto() {
    let cat = catalogo();
    assert_eq!(buscar_ramos(&cat[..2], "x").len(), 2);
    assert!(buscar_ramos(&[], "Redes").is_empty());
}

#[test]
fn test_ramos_disponibles() {
    let cat = catalogo();
    let mut h = Horario::new();
    h.agregar_ramo(cat[0].clone());
    let disponibles = ramos_disponibles(&cat, &h, 1);
    assert_eq!(disponibles, vec!["Redes de Computadoras", "Física", "Cálculo"]);
    assert_eq!(ramos_disponibles(&cat, &h, 2), vec!["Redes Neuronales", "Química", "Compiladores"]);
}
