//! Temporal range rules.
//!
//! Each rule turns a date phrase into a predicate over the creation-date
//! column. Without a reference date the predicate is relative to the server
//! clock (`CURDATE()`); with one it is an anchored literal range. Captured
//! counts are parsed to integers before rendering, nothing else from the
//! input reaches the SQL.

use crate::engine::BucketMask;
use crate::rules::helpers::group_u32;
use crate::ClauseRule;
use chrono::{Datelike, Days, Months, NaiveDate};

fn date_lit(d: NaiveDate) -> String {
    format!("'{}'", d.format("%Y-%m-%d"))
}

/// `col >= 'from' AND col < 'until'`
fn half_open(col: &str, from: NaiveDate, until: NaiveDate) -> String {
    format!("{col} >= {} AND {col} < {}", date_lit(from), date_lit(until))
}

fn rule_today() -> ClauseRule {
    clause_rule! {
        name: "today",
        pattern: r"\b(?:hoy|today)\b",
        optional_phrases: ["hoy", "today"],
        buckets: BucketMask::TEMPORALISH,
        prod: |_caps, env| {
            let col = env.column;
            Some(match env.context.reference_date {
                None => format!("DATE({col}) = CURDATE()"),
                Some(d) => format!("DATE({col}) = {}", date_lit(d)),
            })
        }
    }
}

fn rule_yesterday() -> ClauseRule {
    clause_rule! {
        name: "yesterday",
        pattern: r"\b(?:ayer|yesterday)\b",
        optional_phrases: ["ayer", "yesterday"],
        buckets: BucketMask::TEMPORALISH,
        prod: |_caps, env| {
            let col = env.column;
            Some(match env.context.reference_date {
                None => format!("DATE({col}) = CURDATE() - INTERVAL 1 DAY"),
                Some(d) => format!("DATE({col}) = {}", date_lit(d.pred_opt()?)),
            })
        }
    }
}

fn rule_this_week() -> ClauseRule {
    clause_rule! {
        name: "this week",
        pattern: r"\b(?:esta semana|this week)\b",
        optional_phrases: ["semana", "week"],
        buckets: BucketMask::TEMPORALISH,
        prod: |_caps, env| {
            let col = env.column;
            Some(match env.context.reference_date {
                None => format!("YEARWEEK({col}, 1) = YEARWEEK(CURDATE(), 1)"),
                Some(d) => {
                    let monday = d.checked_sub_days(Days::new(d.weekday().num_days_from_monday().into()))?;
                    half_open(col, monday, monday.checked_add_days(Days::new(7))?)
                }
            })
        }
    }
}

fn rule_this_month() -> ClauseRule {
    clause_rule! {
        name: "this month",
        pattern: r"\b(?:este mes|this month)\b",
        optional_phrases: ["mes", "month"],
        buckets: BucketMask::TEMPORALISH,
        prod: |_caps, env| {
            let col = env.column;
            Some(match env.context.reference_date {
                None => format!("MONTH({col}) = MONTH(CURDATE()) AND YEAR({col}) = YEAR(CURDATE())"),
                Some(d) => {
                    let first = d.with_day(1)?;
                    half_open(col, first, first.checked_add_months(Months::new(1))?)
                }
            })
        }
    }
}

fn rule_this_year() -> ClauseRule {
    clause_rule! {
        name: "this year",
        pattern: r"\b(?:este ano|this year)\b",
        optional_phrases: ["ano", "year"],
        buckets: BucketMask::TEMPORALISH,
        prod: |_caps, env| {
            let col = env.column;
            Some(match env.context.reference_date {
                None => format!("YEAR({col}) = YEAR(CURDATE())"),
                Some(d) => {
                    let first = NaiveDate::from_ymd_opt(d.year(), 1, 1)?;
                    half_open(col, first, NaiveDate::from_ymd_opt(d.year() + 1, 1, 1)?)
                }
            })
        }
    }
}

fn rule_last_n_days() -> ClauseRule {
    clause_rule! {
        name: "last <n> days",
        pattern: r"\b(?:ultim[oa]s|last|past) (\d{1,4}) (?:dias|days)\b",
        optional_phrases: ["dias", "days"],
        buckets: BucketMask::HAS_DIGITS | BucketMask::TEMPORALISH,
        prod: |caps, env| {
            let n = group_u32(caps, 1)?;
            let col = env.column;
            Some(match env.context.reference_date {
                None => format!("{col} >= CURDATE() - INTERVAL {n} DAY"),
                Some(d) => format!("{col} >= {}", date_lit(d.checked_sub_days(Days::new(n.into()))?)),
            })
        }
    }
}

fn rule_last_n_months() -> ClauseRule {
    clause_rule! {
        name: "last <n> months",
        pattern: r"\b(?:ultimos|last|past) (\d{1,3}) (?:meses|months)\b",
        optional_phrases: ["meses", "months"],
        buckets: BucketMask::HAS_DIGITS | BucketMask::TEMPORALISH,
        prod: |caps, env| {
            let n = group_u32(caps, 1)?;
            let col = env.column;
            Some(match env.context.reference_date {
                None => format!("{col} >= CURDATE() - INTERVAL {n} MONTH"),
                Some(d) => format!("{col} >= {}", date_lit(d.checked_sub_months(Months::new(n))?)),
            })
        }
    }
}

/// Temporal rules in application order.
pub(crate) fn get() -> Vec<ClauseRule> {
    vec![
        rule_today(),
        rule_yesterday(),
        rule_this_week(),
        rule_this_month(),
        rule_this_year(),
        rule_last_n_days(),
        rule_last_n_months(),
    ]
}
