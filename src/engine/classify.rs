//! Intent classification.
//!
//! Keyword scoring per intent category, then contextual adjustments, then
//! semantic overrides, then length scaling:
//!
//! ```text
//! text ─▶ score each category (base + length + position + whole-word)
//!      ─▶ best category (ties keep Intent::ALL order, FIND when nothing scores)
//!      ─▶ +question / +command bonuses
//!      ─▶ overrides: quantity question → COUNT, total + money → SUM,
//!                    comparator + quantity/money → SORT
//!      ─▶ clamp, ×0.7 under 3 tokens, ×1.1 over 5 tokens, clamp
//! ```

use crate::rules::helpers::{contains_word, first_contained};
use crate::rules::intent::*;
use crate::{Intent, IntentFlags, IntentResult, NormalizedText};

#[derive(Debug)]
struct CategoryScore {
    intent: Intent,
    score: f64,
    hits: Vec<&'static str>,
}

fn score_category(text: &str, intent: Intent, keywords: &[&'static str]) -> CategoryScore {
    let window = POSITION_WINDOW * text.len() as f64;
    let mut score = 0.0;
    let mut hits = Vec::new();

    for &kw in keywords {
        let Some(pos) = text.find(kw) else {
            continue;
        };
        score += BASE_SCORE;
        if kw.len() > 6 {
            score += LENGTH_BONUS;
        }
        if kw.len() > 10 {
            score += LENGTH_BONUS;
        }
        if (pos as f64) < window {
            score += POSITION_BONUS;
        }
        if contains_word(text, kw) {
            score += WHOLE_WORD_BONUS;
        }
        hits.push(kw);
    }

    CategoryScore { intent, score, hits }
}

fn first_word(text: &str) -> &str {
    text.split(' ').next().unwrap_or("")
}

pub(crate) fn classify(text: &NormalizedText) -> IntentResult {
    let s = text.as_str();
    let scores: Vec<CategoryScore> =
        INTENT_KEYWORDS.iter().map(|(intent, keywords)| score_category(s, *intent, keywords)).collect();

    // Strictly greater keeps the earlier category on ties.
    let mut best: Option<&CategoryScore> = None;
    for cat in scores.iter().filter(|c| c.score > 0.0) {
        if best.is_none_or(|b| cat.score > b.score) {
            best = Some(cat);
        }
    }

    let (mut intent, mut confidence) = best.map(|b| (b.intent, b.score)).unwrap_or((Intent::Find, 0.0));
    let mut matched: Vec<String> = best.map(|b| b.hits.iter().map(|h| h.to_string()).collect()).unwrap_or_default();

    let mut flags = IntentFlags::empty();
    let first = first_word(s);
    if INTERROGATIVES.contains(&first) || text.asked() {
        flags |= IntentFlags::QUESTION;
    }
    if COMMAND_VERBS.contains(&first) {
        flags |= IntentFlags::COMMAND;
    }
    if best.is_some() {
        if flags.contains(IntentFlags::QUESTION) {
            confidence += QUESTION_BONUS;
        }
        if flags.contains(IntentFlags::COMMAND) {
            confidence += COMMAND_BONUS;
        }
    }

    let monetary = first_contained(s, MONETARY_TERMS);
    let mut override_tag = None;
    let mut apply_override = |target: Intent, floor: f64, tag: &'static str, trigger: &'static str| {
        if intent != target {
            intent = target;
            matched = scores
                .iter()
                .find(|c| c.intent == target)
                .map(|c| c.hits.iter().map(|h| h.to_string()).collect())
                .unwrap_or_default();
        }
        if !matched.iter().any(|m| m == trigger) {
            matched.push(trigger.to_string());
        }
        confidence = confidence.max(floor);
        flags |= IntentFlags::OVERRIDE;
        override_tag = Some(tag);
    };

    let quantity = first_contained(s, QUANTITY_TERMS);
    if let (Some(trigger), None) = (first_contained(s, QUANTITY_QUESTIONS), monetary) {
        apply_override(Intent::Count, COUNT_FLOOR, "count", trigger);
    }
    if let (Some(trigger), Some(_)) = (first_contained(s, AGGREGATE_TERMS), monetary) {
        apply_override(Intent::Sum, SUM_FLOOR, "sum", trigger);
    }
    if let Some(trigger) = first_contained(s, RANKING_COMPARATORS) {
        if monetary.is_some() || quantity.is_some() {
            apply_override(Intent::Sort, SORT_FLOOR, "sort", trigger);
        }
    }

    let mut confidence = confidence.clamp(0.0, 1.0);
    let tokens = text.token_count();
    if tokens < 3 {
        confidence *= SHORT_TEXT_PENALTY;
    } else if tokens > 5 {
        confidence *= LONG_TEXT_BOOST;
    }
    let confidence = confidence.clamp(0.0, 1.0);

    tracing::debug!(
        intent = intent.name(),
        confidence,
        keywords = ?matched,
        override_tag,
        "classified intent"
    );

    IntentResult { intent, confidence, matched_keywords: matched, flags, override_tag }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalize;
    use proptest::prelude::*;

    fn classify_raw(raw: &str) -> IntentResult {
        classify(&normalize(raw))
    }

    #[test]
    fn quantity_question_forces_count() {
        let res = classify_raw("cuántos clientes tenemos");
        assert_eq!(res.intent, Intent::Count);
        assert!(res.confidence >= 0.7, "confidence {}", res.confidence);
        assert!(res.is_question());
        assert_eq!(res.override_tag, Some("count"));
        assert_eq!(res.matched_keywords, vec!["cuantos"]);
    }

    #[test]
    fn total_of_money_forces_sum() {
        let res = classify_raw("suma total de precios");
        assert_eq!(res.intent, Intent::Sum);
        assert!(res.confidence >= 0.8);
        // "sum" also hits as a fragment of "suma".
        assert_eq!(res.matched_keywords, vec!["suma", "total", "sum"]);
    }

    #[test]
    fn money_question_is_not_a_count() {
        let res = classify_raw("¿cuántos euros suman los presupuestos en total?");
        assert_eq!(res.intent, Intent::Sum);
        assert_eq!(res.override_tag, Some("sum"));
    }

    #[test]
    fn comparator_with_money_forces_sort() {
        let res = classify_raw("presupuestos con mayor precio");
        assert_eq!(res.intent, Intent::Sort);
        assert!(res.confidence >= 0.6);
        assert!(res.matched_keywords.contains(&"mayor".to_string()));
    }

    #[test]
    fn no_keywords_defaults_to_find_with_zero_confidence() {
        let res = classify_raw("presupuestos aprobados de este mes");
        assert_eq!(res.intent, Intent::Find);
        assert_eq!(res.confidence, 0.0);
        assert!(res.matched_keywords.is_empty());

        let empty = classify_raw("");
        assert_eq!(empty.intent, Intent::Find);
        assert_eq!(empty.confidence, 0.0);
    }

    #[test]
    fn command_verb_adds_bonus() {
        let plain = classify_raw("listado de presupuestos pendientes");
        let command = classify_raw("muestra listado de presupuestos pendientes");
        assert_eq!(command.intent, Intent::Find);
        assert!(command.is_command());
        assert!(!plain.is_command());
        assert!(command.confidence > plain.confidence);
    }

    #[test]
    fn ties_keep_enumeration_order() {
        // "cuenta" (COUNT) and "borra" (DELETE) score identically as whole words
        // outside the position window.
        let res = classify_raw("x x x x x x x x x x x x x cuenta borra");
        assert_eq!(res.intent, Intent::Count);
    }

    #[test]
    fn short_texts_are_penalized() {
        let res = classify_raw("quitar presupuesto");
        assert_eq!(res.intent, Intent::Delete);
        // 0.15 base + 0.10 position + 0.10 whole word, ×0.7
        assert!((res.confidence - 0.245).abs() < 1e-9, "confidence {}", res.confidence);
    }

    fn assert_confidence(res: &IntentResult, expected: f64) {
        assert!((res.confidence - expected).abs() < 1e-9, "confidence {} != {expected}", res.confidence);
    }

    #[test]
    fn trailing_question_mark_adds_bonus() {
        // "borrar" whole word 0.25 + "borra" fragment 0.15
        let plain = classify_raw("presupuestos para borrar");
        assert_eq!(plain.intent, Intent::Delete);
        assert!(!plain.is_question());
        assert_confidence(&plain, 0.40);

        let asked = classify_raw("presupuestos para borrar?");
        assert!(asked.is_question());
        assert_confidence(&asked, 0.60);
    }

    #[test]
    fn interrogative_first_word_adds_bonus() {
        let res = classify_raw("que presupuestos borrar");
        assert_eq!(res.intent, Intent::Delete);
        assert!(res.is_question());
        assert_confidence(&res, 0.60);
    }

    #[test]
    fn long_texts_are_boosted() {
        let five = classify_raw("presupuestos pendientes para borrar hoy");
        assert_confidence(&five, 0.40);

        let six = classify_raw("presupuestos pendientes para borrar esta semana");
        assert_eq!(six.intent, Intent::Delete);
        assert_confidence(&six, 0.44);
    }

    #[test]
    fn long_keywords_earn_length_bonuses() {
        // "consultar" (9 chars): base + one length bonus + whole word
        let res = classify_raw("presupuestos para consultar");
        assert_eq!(res.intent, Intent::Find);
        assert_eq!(res.matched_keywords, vec!["consultar"]);
        assert_confidence(&res, 0.30);

        // "diferencia entre" (16 chars): base + two length bonuses + whole word
        let res = classify_raw("presupuestos con diferencia entre");
        assert_eq!(res.intent, Intent::Compare);
        assert_eq!(res.matched_keywords, vec!["diferencia entre"]);
        assert_confidence(&res, 0.35);
    }

    proptest! {
        #[test]
        fn confidence_is_bounded(input in "\\PC{0,80}") {
            let res = classify_raw(&input);
            prop_assert!((0.0..=1.0).contains(&res.confidence));
        }

        #[test]
        fn keyword_soup_confidence_is_bounded(
            words in proptest::collection::vec(
                proptest::sample::select(vec![
                    "cuantos", "total", "precio", "mayor", "muestra", "agrupar", "borrar", "suma", "top", "que",
                ]),
                0..20,
            )
        ) {
            let res = classify_raw(&words.join(" "));
            prop_assert!((0.0..=1.0).contains(&res.confidence));
        }
    }
}
