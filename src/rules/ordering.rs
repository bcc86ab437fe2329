//! Ranking and grouping language.
//!
//! Both tables are scanned in order and the first phrase found wins.

use crate::rules::helpers::contains_any;

/// Explicit ordering requested by the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ranking {
    MostRecent,
    HighestAmount,
    LowestAmount,
}

const RANKING_PHRASES: &[(Ranking, &[&str])] = &[
    (
        Ranking::HighestAmount,
        &[
            "mayor precio",
            "mayor importe",
            "mayor coste",
            "precio mas alto",
            "importe mas alto",
            "mas caro",
            "mas cara",
            "highest price",
            "highest amount",
            "most expensive",
        ],
    ),
    (
        Ranking::LowestAmount,
        &[
            "menor precio",
            "menor importe",
            "menor coste",
            "precio mas bajo",
            "importe mas bajo",
            "mas barato",
            "mas barata",
            "lowest price",
            "lowest amount",
            "cheapest",
        ],
    ),
    (
        Ranking::MostRecent,
        &["mas reciente", "recientes", "ultimos presupuestos", "most recent", "latest", "newest"],
    ),
];

pub(crate) fn detect_ranking(text: &str) -> Option<Ranking> {
    RANKING_PHRASES.iter().find(|(_, phrases)| contains_any(text, phrases)).map(|(ranking, _)| *ranking)
}

/// Dimension a GROUP / COMPARE query is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GroupKey {
    Customer,
    Month,
    Status,
}

const GROUP_PHRASES: &[(GroupKey, &[&str])] = &[
    (GroupKey::Customer, &["por cliente", "cada cliente", "by customer", "per customer"]),
    (GroupKey::Month, &["por mes", "mensual", "cada mes", "by month", "per month", "monthly"]),
    (GroupKey::Status, &["por estado", "by status", "per status"]),
];

/// Status is the default grouping when no phrase names one.
pub(crate) fn detect_group_key(text: &str) -> GroupKey {
    GROUP_PHRASES.iter().find(|(_, phrases)| contains_any(text, phrases)).map(|(key, _)| *key).unwrap_or(GroupKey::Status)
}

pub(crate) const COST_TERMS: &[&str] = &["coste", "costo", "cost"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_phrases() {
        assert_eq!(detect_ranking("presupuestos con mayor precio"), Some(Ranking::HighestAmount));
        assert_eq!(detect_ranking("los mas baratos"), Some(Ranking::LowestAmount));
        assert_eq!(detect_ranking("presupuestos mas recientes"), Some(Ranking::MostRecent));
        assert_eq!(detect_ranking("presupuestos de los ultimos 15 dias"), None);
    }

    #[test]
    fn grouping_defaults_to_status() {
        assert_eq!(detect_group_key("importe agrupado por cliente"), GroupKey::Customer);
        assert_eq!(detect_group_key("facturacion mensual"), GroupKey::Month);
        assert_eq!(detect_group_key("agrupar presupuestos"), GroupKey::Status);
    }
}
