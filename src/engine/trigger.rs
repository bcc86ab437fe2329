//! Trigger scanning (input pre-classification).
//!
//! This module inspects the normalized query once and produces coarse signals
//! that let the extractor skip clause rules that cannot possibly match.
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains digits".
//! - **Phrases** (`TriggerInfo::phrases`): key words found in the input
//!   ("hoy", "mes", "entre", ...), used for `optional_phrases` gating.
//!
//! This is a *heuristic* scan. False positives are fine because the rule's
//! regex still has to match; false negatives are not, so every phrase a rule
//! gates on must be listed in `KEY_PHRASES`.

use crate::ClauseRule;
use std::collections::HashSet;

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS   = 1 << 0;
        const TEMPORALISH  = 1 << 1;
        const COMPARATIVE  = 1 << 2;
    }
}

const TEMPORAL_WORDS: &[&str] = &[
    "hoy", "ayer", "semana", "mes", "meses", "ano", "dia", "dias", "today", "yesterday", "week", "month", "months",
    "year", "day", "days",
];

const COMPARATIVE_WORDS: &[&str] = &[
    "mas", "menos", "mayor", "mayores", "menor", "menores", "superior", "superiores", "inferior", "inferiores", "entre",
    "more", "less", "greater", "between", "over", "under", "below",
];

const KEY_PHRASES: &[&str] = &[
    "hoy",
    "ayer",
    "semana",
    "mes",
    "meses",
    "ano",
    "dias",
    "ultimos",
    "ultimas",
    "today",
    "yesterday",
    "week",
    "month",
    "months",
    "year",
    "days",
    "last",
    "past",
    "mas",
    "menos",
    "mayor",
    "mayores",
    "menor",
    "menores",
    "superior",
    "superiores",
    "inferior",
    "inferiores",
    "entre",
    "more",
    "less",
    "over",
    "under",
    "greater",
    "below",
    "between",
];

/// Input characteristics detected from normalized text.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
    pub phrases: HashSet<&'static str>,
}

impl TriggerInfo {
    /// Scan normalized `input` for coarse buckets and key phrases.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let mut phrases = HashSet::new();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }

        // Punctuation kept by normalization ("este mes.") is a word boundary.
        let words: Vec<&str> = input.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();
        if words.iter().any(|w| TEMPORAL_WORDS.contains(w)) {
            buckets |= BucketMask::TEMPORALISH;
        }
        if words.iter().any(|w| COMPARATIVE_WORDS.contains(w)) {
            buckets |= BucketMask::COMPARATIVE;
        }

        for phrase in KEY_PHRASES {
            if words.contains(phrase) {
                phrases.insert(*phrase);
            }
        }

        TriggerInfo { buckets, phrases }
    }

    /// Whether `rule`'s bucket and phrase requirements are met.
    pub(crate) fn admits(&self, rule: &ClauseRule) -> bool {
        if !self.buckets.contains(rule.buckets) {
            return false;
        }
        rule.optional_phrases.is_empty() || rule.optional_phrases.iter().any(|p| self.phrases.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_sets_buckets_and_phrases() {
        let info = TriggerInfo::scan("presupuestos de mas de 500 de este mes");
        assert!(info.buckets.contains(BucketMask::HAS_DIGITS | BucketMask::TEMPORALISH | BucketMask::COMPARATIVE));
        assert!(info.phrases.contains("mes"));
        assert!(info.phrases.contains("mas"));
        assert!(!info.phrases.contains("entre"));
    }

    #[test]
    fn phrases_match_whole_words_only() {
        let info = TriggerInfo::scan("mesa de mayoristas");
        assert!(!info.phrases.contains("mes"));
        assert!(!info.phrases.contains("mayor"));
        assert!(info.buckets.is_empty());
    }

    #[test]
    fn trailing_punctuation_does_not_hide_words() {
        let info = TriggerInfo::scan("presupuestos de este mes.");
        assert!(info.buckets.contains(BucketMask::TEMPORALISH));
        assert!(info.phrases.contains("mes"));

        let info = TriggerInfo::scan("ultimos 15 dias.");
        assert!(info.buckets.contains(BucketMask::HAS_DIGITS | BucketMask::TEMPORALISH));
        assert!(info.phrases.contains("ultimos"));
        assert!(info.phrases.contains("dias"));

        let info = TriggerInfo::scan("importe (mayor) de 500, hoy?");
        assert!(info.buckets.contains(BucketMask::COMPARATIVE | BucketMask::TEMPORALISH));
        assert!(info.phrases.contains("mayor"));
        assert!(info.phrases.contains("hoy"));
    }

    #[test]
    fn digits_alone_are_not_comparative() {
        let info = TriggerInfo::scan("presupuesto 500");
        assert_eq!(info.buckets, BucketMask::HAS_DIGITS);
        assert!(info.phrases.is_empty());
    }
}
