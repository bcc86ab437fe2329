//! Query synthesis.
//!
//! Assembles one SELECT from the classified intent, the extracted entities and
//! the schema:
//!
//! ```text
//! principal ─▶ FROM (quote header, or line items INNER JOIN header)
//! intent    ─▶ projection (entity default | COUNT | SUM | grouped aggregate)
//! entities  ─▶ WHERE status AND temporal AND numeric
//! raw text  ─▶ ORDER BY / LIMIT (ranking phrase, else date DESC LIMIT 20)
//! ```

use crate::error::SynthesisError;
use crate::rules::helpers::contains_any;
use crate::rules::ordering::{COST_TERMS, GroupKey, Ranking, detect_group_key, detect_ranking};
use crate::{EntityKind, EntitySet, Intent, IntentResult, NormalizedText, SchemaKnowledge};

/// Row limit of the generic fallback shape.
pub const GENERIC_LIMIT: u32 = 20;
/// Row limit when the text asks for a ranking.
pub const RANKING_LIMIT: u32 = 10;

/// A synthesized statement plus what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedQuery {
    pub sql: String,
    pub intent: Intent,
    pub principal: Option<EntityKind>,
    pub ranking: Option<Ranking>,
    pub limit: Option<u32>,
}

impl SynthesizedQuery {
    /// Date-descending listing with the default limit and no ranking phrase.
    pub fn is_generic(&self) -> bool {
        self.limit == Some(GENERIC_LIMIT) && self.ranking.is_none()
    }
}

#[derive(Debug, Default)]
struct SelectParts {
    projection: Vec<String>,
    from: String,
    filters: Vec<String>,
    group_by: Option<String>,
    order_by: Option<String>,
    limit: Option<u32>,
}

impl SelectParts {
    fn render(&self) -> String {
        let mut sql = String::from("SELECT ");
        sql.push_str(&self.projection.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&self.from);
        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.filters.join(" AND "));
        }
        if let Some(group_by) = &self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);
        }
        if let Some(order_by) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql.push(';');
        sql
    }
}

pub(crate) fn synthesize(
    intent: &IntentResult,
    entities: &EntitySet,
    text: &NormalizedText,
    schema: &SchemaKnowledge,
) -> Result<SynthesizedQuery, SynthesisError> {
    let s = text.as_str();
    let lines = entities.principal == Some(EntityKind::LineItem);

    let mut parts = SelectParts {
        from: if lines { schema.line_source() } else { schema.quote_source() },
        filters: filters(entities, schema)?,
        ..SelectParts::default()
    };
    let mut ranking = None;

    match intent.intent {
        Intent::Count => {
            let expr = match entities.principal {
                Some(EntityKind::Customer) => format!("COUNT(DISTINCT {})", schema.customer_column()),
                _ => "COUNT(*)".to_string(),
            };
            parts.projection = vec![format!("{expr} AS total")];
        }
        Intent::Sum => {
            let expr = if contains_any(s, COST_TERMS) {
                schema.cost_column()
            } else if lines {
                format!("{} * {}", schema.line_quantity_column(), schema.line_price_column())
            } else {
                schema.amount_column()
            };
            parts.projection = vec![format!("SUM({expr}) AS total")];
        }
        Intent::Group | Intent::Compare => {
            let key = match detect_group_key(s) {
                GroupKey::Customer => schema.customer_column(),
                GroupKey::Month => format!("DATE_FORMAT({}, '%Y-%m')", schema.created_column()),
                GroupKey::Status => schema.status_column(),
            };
            parts.projection = vec![
                format!("{key} AS grupo"),
                "COUNT(*) AS total".to_string(),
                format!("SUM({}) AS importe_total", schema.amount_column()),
            ];
            parts.order_by = Some(key.clone());
            parts.group_by = Some(key);
        }
        Intent::Find | Intent::Sort | Intent::Create | Intent::Update | Intent::Delete => {
            let entity = entities.principal.unwrap_or(EntityKind::Quote);
            let projection = schema
                .projection(entity)
                .filter(|p| !p.columns.is_empty())
                .or_else(|| schema.projection(EntityKind::Quote).filter(|p| !p.columns.is_empty()))
                .ok_or(SynthesisError::EmptyProjection(entity))?;
            parts.projection = projection.columns.clone();

            ranking = detect_ranking(s);
            let created = schema.created_column();
            let amount = if lines { schema.line_price_column() } else { schema.amount_column() };
            let (key, descending, limit) = match ranking {
                Some(Ranking::MostRecent) => (created, true, RANKING_LIMIT),
                Some(Ranking::HighestAmount) => (amount, true, RANKING_LIMIT),
                Some(Ranking::LowestAmount) => (amount, false, RANKING_LIMIT),
                None => (created, true, GENERIC_LIMIT),
            };
            // Distinct rows are grouped so the sort key may sit outside the
            // select list; MySQL rejects that under plain DISTINCT.
            let key = if projection.distinct {
                parts.group_by = Some(projection.columns.join(", "));
                format!("{}({key})", if descending { "MAX" } else { "MIN" })
            } else {
                key
            };
            parts.order_by = Some(format!("{key} {}", if descending { "DESC" } else { "ASC" }));
            parts.limit = Some(limit);
        }
    }

    let query = SynthesizedQuery {
        sql: parts.render(),
        intent: intent.intent,
        principal: entities.principal,
        ranking,
        limit: parts.limit,
    };
    tracing::debug!(sql = %query.sql, "synthesized query");
    Ok(query)
}

/// WHERE conjuncts: statuses, then temporal, then numeric.
fn filters(entities: &EntitySet, schema: &SchemaKnowledge) -> Result<Vec<String>, SynthesisError> {
    let status_column = schema.status_column();
    let mut filters = Vec::with_capacity(entities.statuses.len() + entities.temporal.len() + entities.numeric.len());
    for status in &entities.statuses {
        let value = schema.status_value(*status).ok_or(SynthesisError::UnmappedStatus(*status))?;
        filters.push(format!("{status_column} = '{}'", value.replace('\'', "''")));
    }
    filters.extend(entities.temporal.iter().map(|c| c.predicate.clone()));
    filters.extend(entities.numeric.iter().map(|c| c.predicate.clone()));
    Ok(filters)
}
