//! Classic generator: a flat substring -> SQL template table.
//!
//! Independent of `SchemaKnowledge` on purpose: table and column names are
//! spelled out in the templates. First matching row wins.

const CLASSIC_TEMPLATES: &[(&[&str], &str)] = &[
    (
        &["cuantos clientes", "numero de clientes", "how many customers"],
        "SELECT COUNT(DISTINCT cliente) AS total FROM presupuestos",
    ),
    (
        &["cuantos presupuestos", "numero de presupuestos", "how many quotes"],
        "SELECT COUNT(*) AS total FROM presupuestos",
    ),
    (&["facturacion total", "importe total", "total facturado"], "SELECT SUM(importe) AS total FROM presupuestos"),
    (
        &["semana pasada", "last week"],
        "SELECT * FROM presupuestos WHERE YEARWEEK(fecha, 1) = YEARWEEK(CURDATE() - INTERVAL 1 WEEK, 1) ORDER BY fecha DESC",
    ),
    (
        &["mes pasado", "last month"],
        "SELECT * FROM presupuestos WHERE MONTH(fecha) = MONTH(CURDATE() - INTERVAL 1 MONTH) AND YEAR(fecha) = YEAR(CURDATE() - INTERVAL 1 MONTH) ORDER BY fecha DESC",
    ),
    (&["pendiente"], "SELECT * FROM presupuestos WHERE estado = 'PENDIENTE' ORDER BY fecha DESC"),
    (&["aprobad"], "SELECT * FROM presupuestos WHERE estado = 'APROBADO' ORDER BY fecha DESC"),
    (&["entregad"], "SELECT * FROM presupuestos WHERE estado = 'ENTREGADO' ORDER BY fecha DESC"),
    (&["facturad"], "SELECT * FROM presupuestos WHERE estado = 'FACTURADO' ORDER BY fecha DESC"),
    (&["rechazad"], "SELECT * FROM presupuestos WHERE estado = 'RECHAZADO' ORDER BY fecha DESC"),
    (&["mas caro", "mayor precio", "mayor importe"], "SELECT * FROM presupuestos ORDER BY importe DESC LIMIT 10"),
    (&["mas barato", "menor precio", "menor importe"], "SELECT * FROM presupuestos ORDER BY importe ASC LIMIT 10"),
    (&["hoy"], "SELECT * FROM presupuestos WHERE DATE(fecha) = CURDATE()"),
    (
        &["por cliente"],
        "SELECT cliente, COUNT(*) AS total, SUM(importe) AS importe_total FROM presupuestos GROUP BY cliente ORDER BY importe_total DESC",
    ),
    (&["por estado"], "SELECT estado, COUNT(*) AS total FROM presupuestos GROUP BY estado"),
    (
        &["linea", "articulo", "producto"],
        "SELECT l.* FROM presupuesto_lineas l JOIN presupuestos p ON l.presupuesto_id = p.id ORDER BY p.fecha DESC LIMIT 50",
    ),
    (&["cliente"], "SELECT DISTINCT cliente FROM presupuestos ORDER BY cliente"),
];

const CLASSIC_DEFAULT: &str = "SELECT * FROM presupuestos ORDER BY fecha DESC LIMIT 20";

/// Template for normalized `text`; the default listing when nothing matches.
pub(crate) fn generate(text: &str) -> &'static str {
    CLASSIC_TEMPLATES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| text.contains(n)))
        .map(|(_, sql)| *sql)
        .unwrap_or(CLASSIC_DEFAULT)
}
