//! Intent keyword tables and the lexicons used by contextual adjustments and
//! semantic overrides. All entries are in normalized form.

use crate::Intent;

/// Keywords per intent, in tie-break order.
pub(crate) const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Find,
        &[
            "buscar", "busca", "mostrar", "muestra", "muestrame", "ensename", "listar", "listado", "lista", "dame",
            "traer", "traeme", "trae", "consultar", "ver", "find", "show", "list", "search", "get", "bring",
        ],
    ),
    (
        Intent::Count,
        &["cuantos", "cuantas", "cantidad de", "numero de", "contar", "cuenta", "conteo", "how many", "count", "number of"],
    ),
    (Intent::Sum, &["suma", "sumar", "total", "importe total", "facturacion", "acumulado", "sum"]),
    (
        Intent::Compare,
        &["comparar", "compara", "comparacion", "versus", "frente a", "diferencia entre", "compare", "difference", "vs"],
    ),
    (
        Intent::Group,
        &[
            "agrupar", "agrupado", "agrupados", "por cliente", "por estado", "por mes", "por cada", "desglose",
            "group by", "grouped", "breakdown",
        ],
    ),
    (
        Intent::Sort,
        &[
            "ordenar", "ordenado", "ordena", "mayor", "menor", "mas caro", "mas barato", "ranking", "top", "sort",
            "order by", "highest", "lowest", "most expensive", "cheapest",
        ],
    ),
    (Intent::Create, &["crear", "crea", "nuevo presupuesto", "insertar", "dar de alta", "create", "insert", "add new"]),
    (
        Intent::Update,
        &["actualizar", "actualiza", "modificar", "modifica", "cambiar", "cambia", "update", "modify", "change"],
    ),
    (Intent::Delete, &["eliminar", "elimina", "borrar", "borra", "quitar", "delete", "remove"]),
];

/// First words that make the query a question.
pub(crate) const INTERROGATIVES: &[&str] = &[
    "que", "cual", "cuales", "cuanto", "cuanta", "cuantos", "cuantas", "como", "donde", "cuando", "quien", "quienes",
    "hay", "what", "which", "how", "who", "where", "when", "is", "are", "do", "does",
];

/// First words that make the query a command.
pub(crate) const COMMAND_VERBS: &[&str] = &[
    "muestra", "muestrame", "mostrar", "ensename", "busca", "buscame", "buscar", "dame", "trae", "traeme", "traer",
    "lista", "listar", "show", "find", "bring", "list", "give", "get",
];

pub(crate) const QUANTITY_QUESTIONS: &[&str] = &[
    "cuantos", "cuantas", "cuanto hay", "how many", "is there", "are there", "hay algun", "existe", "existen",
    "numero de", "cantidad de",
];

pub(crate) const MONETARY_TERMS: &[&str] = &[
    "precio", "importe", "coste", "costo", "dinero", "monto", "euros", "valor", "price", "amount", "cost", "money",
    "value",
];

pub(crate) const AGGREGATE_TERMS: &[&str] = &["total", "suma", "sumar", "sumatorio", "acumulado", "sum", "aggregate"];

pub(crate) const RANKING_COMPARATORS: &[&str] = &[
    "mayor", "menor", "mas alto", "mas alta", "mas bajo", "mas baja", "maximo", "minimo", "mas caro", "mas barato",
    "top", "highest", "lowest", "most expensive", "cheapest",
];

pub(crate) const QUANTITY_TERMS: &[&str] = &["cantidad", "unidades", "numero", "quantity", "units"];

/// Base score for every keyword hit.
pub(crate) const BASE_SCORE: f64 = 0.15;
pub(crate) const LENGTH_BONUS: f64 = 0.05;
pub(crate) const POSITION_BONUS: f64 = 0.10;
/// Fraction of the text within which a hit earns the position bonus.
pub(crate) const POSITION_WINDOW: f64 = 0.30;
pub(crate) const WHOLE_WORD_BONUS: f64 = 0.10;
pub(crate) const QUESTION_BONUS: f64 = 0.20;
pub(crate) const COMMAND_BONUS: f64 = 0.20;

pub(crate) const COUNT_FLOOR: f64 = 0.7;
pub(crate) const SUM_FLOOR: f64 = 0.8;
pub(crate) const SORT_FLOOR: f64 = 0.6;

pub(crate) const SHORT_TEXT_PENALTY: f64 = 0.7;
pub(crate) const LONG_TEXT_BOOST: f64 = 1.1;
