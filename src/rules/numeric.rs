//! Numeric range rules over the amount column.
//!
//! Numbers are parsed and re-rendered; a trailing time unit ("mas de 15 dias")
//! means the number is a duration, not an amount, and the rule declines.

use crate::ClauseRule;
use crate::engine::BucketMask;
use crate::rules::helpers::{group_f64, sql_number};

fn rule_more_than() -> ClauseRule {
    clause_rule! {
        name: "more than <n>",
        pattern: r"\b(?:mas de|mas que|mayor(?:es)? (?:de|que|a)|superior(?:es)? a|more than|greater than|over) (\d+(?:\.\d+)?)(?: (dias|days|meses|months|semanas|weeks))?\b",
        optional_phrases: ["mas", "mayor", "mayores", "superior", "superiores", "more", "greater", "over"],
        buckets: BucketMask::HAS_DIGITS | BucketMask::COMPARATIVE,
        prod: |caps, env| {
            if caps.get(2).is_some() {
                return None;
            }
            let n = group_f64(caps, 1)?;
            Some(format!("{} > {}", env.column, sql_number(n)))
        }
    }
}

fn rule_less_than() -> ClauseRule {
    clause_rule! {
        name: "less than <n>",
        pattern: r"\b(?:menos de|menos que|menor(?:es)? (?:de|que|a)|inferior(?:es)? a|less than|under|below) (\d+(?:\.\d+)?)(?: (dias|days|meses|months|semanas|weeks))?\b",
        optional_phrases: ["menos", "menor", "menores", "inferior", "inferiores", "less", "under", "below"],
        buckets: BucketMask::HAS_DIGITS | BucketMask::COMPARATIVE,
        prod: |caps, env| {
            if caps.get(2).is_some() {
                return None;
            }
            let n = group_f64(caps, 1)?;
            Some(format!("{} < {}", env.column, sql_number(n)))
        }
    }
}

fn rule_between() -> ClauseRule {
    clause_rule! {
        name: "between <n> and <m>",
        pattern: r"\b(?:entre|between) (\d+(?:\.\d+)?) (?:y|and) (\d+(?:\.\d+)?)\b",
        optional_phrases: ["entre", "between"],
        buckets: BucketMask::HAS_DIGITS | BucketMask::COMPARATIVE,
        prod: |caps, env| {
            let a = group_f64(caps, 1)?;
            let b = group_f64(caps, 2)?;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            Some(format!("{} BETWEEN {} AND {}", env.column, sql_number(lo), sql_number(hi)))
        }
    }
}

/// Numeric rules in application order.
pub(crate) fn get() -> Vec<ClauseRule> {
    vec![rule_more_than(), rule_less_than(), rule_between()]
}
