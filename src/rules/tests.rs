use crate::{Context, EntityKind, Intent, classify, extract, normalize, resolve_with, sanitize};
use chrono::NaiveDate;

fn reference_context() -> Context {
    Context::anchored(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
}

#[test]
fn intent_examples() {
    // Array of (expected_intent, input_string)
    let cases: Vec<(Intent, &str)> = vec![
        (Intent::Count, "cuántos presupuestos hay"),
        (Intent::Count, "how many customers do we have"),
        (Intent::Sum, "dame el importe total"),
        (Intent::Sum, "total amount of quotes"),
        (Intent::Sum, "suma total de las partidas"),
        (Intent::Compare, "compara presupuestos aprobados frente a rechazados"),
        (Intent::Group, "agrupar presupuestos por estado"),
        (Intent::Group, "desglose mensual de presupuestos"),
        (Intent::Sort, "ordenar clientes por fecha"),
        (Intent::Sort, "top clientes por cantidad"),
        (Intent::Create, "crear un nuevo presupuesto"),
        (Intent::Update, "actualizar el estado del presupuesto"),
        (Intent::Delete, "elimina los rechazados"),
        (Intent::Find, "show me the latest quotes"),
        (Intent::Find, "presupuestos aprobados de este mes"),
    ];

    for (expected, input) in cases {
        let res = classify(&normalize(input));
        assert_eq!(res.intent, expected, "input {input:?}: {res:?}");
        assert!((0.0..=1.0).contains(&res.confidence), "input {input:?}: {}", res.confidence);
    }
}

#[test]
fn principal_entity_examples() {
    let cases: Vec<(Option<EntityKind>, &str)> = vec![
        (Some(EntityKind::Customer), "presupuestos del cliente Garcia"),
        (Some(EntityKind::Customer), "customers with approved quotes"),
        (Some(EntityKind::Quote), "ofertas pendientes"),
        (Some(EntityKind::LineItem), "articulos mas caros"),
        (Some(EntityKind::Price), "importe medio"),
        (Some(EntityKind::Date), "que fecha es"),
        (Some(EntityKind::Status), "situacion general"),
        (None, "hola"),
        (None, ""),
    ];

    for (expected, input) in cases {
        assert_eq!(extract(&normalize(input)).principal, expected, "input {input:?}");
    }
}

#[test]
fn resolved_sql_examples() {
    // Array of (expected_fragment, input_string), anchored at 2024-02-14.
    let cases: Vec<(&str, &str)> = vec![
        ("WHERE DATE(p.fecha) = '2024-02-14'", "presupuestos de hoy"),
        ("WHERE DATE(p.fecha) = '2024-02-13'", "presupuestos de ayer"),
        ("WHERE p.fecha >= '2024-02-07'", "presupuestos de los últimos 7 días"),
        ("WHERE p.fecha >= '2024-02-12' AND p.fecha < '2024-02-19'", "presupuestos de esta semana"),
        ("SELECT p.cliente, p.contacto, p.telefono FROM presupuestos p", "clientes de este año"),
        ("GROUP BY p.cliente, p.contacto, p.telefono ORDER BY MAX(p.fecha) DESC LIMIT 20", "clientes de este año"),
        ("WHERE p.fecha >= '2024-01-01' AND p.fecha < '2025-01-01'", "clientes de este año"),
        ("WHERE p.importe BETWEEN 100 AND 500", "presupuestos entre 100 y 500 euros"),
        ("WHERE p.estado = 'FACTURADO' AND p.importe > 2000", "presupuestos facturados de más de 2000"),
        ("WHERE p.importe < 99.9", "ofertas de menos de 99.90"),
        ("ORDER BY l.precio DESC LIMIT 10", "artículos más caros"),
        ("FROM presupuesto_lineas l INNER JOIN presupuestos p ON l.presupuesto_id = p.id", "artículos más caros"),
        ("ORDER BY p.fecha DESC LIMIT 10", "presupuestos más recientes"),
        (
            "SELECT SUM(l.cantidad * l.precio) AS total FROM presupuesto_lineas l INNER JOIN presupuestos p",
            "suma total de las partidas",
        ),
        ("SELECT SUM(p.coste) AS total FROM presupuesto_lineas l", "suma del coste de las lineas"),
        ("GROUP BY DATE_FORMAT(p.fecha, '%Y-%m')", "desglose mensual de presupuestos"),
        ("GROUP BY p.estado ORDER BY p.estado", "agrupar presupuestos"),
        ("SELECT COUNT(*) AS total FROM presupuestos p WHERE p.estado = 'PENDIENTE'", "cuántos presupuestos pendientes hay"),
    ];

    let ctx = reference_context();
    for (fragment, input) in cases {
        let sql = resolve_with(input, &ctx);
        assert!(sql.contains(fragment), "input {input:?}\n  expected fragment: {fragment}\n  got: {sql}");
    }
}

#[test]
fn resolved_sql_is_a_sanitizer_fixed_point() {
    let inputs = [
        "",
        "¿¿??",
        "presupuestos; DROP TABLE presupuestos",
        "clientes\\n pendientes\t de hoy",
        "suma total de precios",
        "presupuestos de la semana pasada",
        "elimina todos los presupuestos",
    ];

    let ctx = reference_context();
    for input in inputs {
        let sql = resolve_with(input, &ctx);
        assert!(sql.starts_with("SELECT "), "input {input:?}: {sql}");
        assert!(sql.ends_with(';'), "input {input:?}: {sql}");
        assert_eq!(sanitize(&sql), sql, "input {input:?}");
    }
}
