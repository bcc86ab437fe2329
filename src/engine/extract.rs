//! Entity extraction.
//!
//! Four independent detectors over the same normalized text:
//!
//! - principal entity: first alias hit scanning `EntityKind::PRIORITY` in order
//! - status filters: every status with an alias hit, deduplicated
//! - temporal clauses: one clause per matching temporal rule
//! - numeric clauses: one clause per matching numeric rule
//!
//! None reads another's output, so their order does not matter.

use super::trigger::TriggerInfo;
use crate::{AliasDictionary, Clause, ClauseEnv, ClauseRule, Context, EntityKind, EntitySet, NormalizedText};
use crate::{SchemaKnowledge, StatusToken};
use once_cell::sync::Lazy;

static TEMPORAL_RULES: Lazy<Vec<ClauseRule>> = Lazy::new(crate::rules::temporal::get);
static NUMERIC_RULES: Lazy<Vec<ClauseRule>> = Lazy::new(crate::rules::numeric::get);

pub(crate) fn extract(
    text: &NormalizedText,
    aliases: &AliasDictionary,
    schema: &SchemaKnowledge,
    context: &Context,
) -> EntitySet {
    let s = text.as_str();
    let trigger = TriggerInfo::scan(s);
    tracing::trace!(buckets = ?trigger.buckets, phrases = ?trigger.phrases, "trigger scan");

    let date_column = schema.created_column();
    let amount_column = schema.amount_column();

    let entities = EntitySet {
        principal: principal_entity(s, aliases),
        statuses: status_filters(s, aliases),
        temporal: apply_rules(s, &TEMPORAL_RULES, &trigger, &ClauseEnv { column: &date_column, context }),
        numeric: apply_rules(s, &NUMERIC_RULES, &trigger, &ClauseEnv { column: &amount_column, context }),
    };

    tracing::debug!(
        principal = ?entities.principal,
        statuses = ?entities.statuses,
        temporal = entities.temporal.len(),
        numeric = entities.numeric.len(),
        "extracted entities"
    );
    entities
}

/// First category in priority order with any alias contained in `text`.
fn principal_entity(text: &str, aliases: &AliasDictionary) -> Option<EntityKind> {
    EntityKind::PRIORITY
        .into_iter()
        .find(|kind| aliases.entity_variants(*kind).iter().any(|alias| text.contains(alias.as_str())))
}

fn status_filters(text: &str, aliases: &AliasDictionary) -> Vec<StatusToken> {
    StatusToken::ALL
        .into_iter()
        .filter(|status| aliases.status_variants(*status).iter().any(|alias| text.contains(alias.as_str())))
        .collect()
}

/// Apply each admitted rule; the first match whose production succeeds
/// contributes that rule's clause.
fn apply_rules(text: &str, rules: &[ClauseRule], trigger: &TriggerInfo, env: &ClauseEnv<'_>) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for rule in rules {
        if !trigger.admits(rule) {
            continue;
        }
        let produced = rule.pattern.captures_iter(text).find_map(|caps| {
            let predicate = (rule.production)(&caps, env)?;
            let source = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
            Some(Clause { source, predicate, rule: rule.name })
        });
        if let Some(clause) = produced {
            tracing::trace!(rule = rule.name, source = %clause.source, "clause rule matched");
            clauses.push(clause);
        }
    }
    clauses
}
