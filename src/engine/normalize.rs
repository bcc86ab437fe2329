//! Text normalization.
//!
//! Every later stage matches against normalized text, so the alias and keyword
//! tables only need to spell each surface form once.

use crate::NormalizedText;

/// Characters replaced by a space before whitespace is collapsed.
const STRAY_PUNCTUATION: &[char] = &['¿', '?', '¡', '!', ',', ';', ':'];

/// Lower-case, strip diacritics, drop stray punctuation, collapse whitespace.
pub(crate) fn normalize(raw: &str) -> NormalizedText {
    let asked = raw.trim_end().ends_with('?');
    NormalizedText { text: normalize_str(raw), asked }
}

/// String-level normalization shared with config loading.
///
/// Idempotent: `normalize_str(&normalize_str(x)) == normalize_str(x)`.
pub(crate) fn normalize_str(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        if STRAY_PUNCTUATION.contains(&c) {
            folded.push(' ');
        } else {
            folded.push(fold_diacritic(c));
        }
    }
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn folds_case_accents_and_punctuation() {
        let n = normalize("  ¿Cuántos   PRESUPUESTOS, señor?  ");
        assert_eq!(n.as_str(), "cuantos presupuestos senor");
        assert!(n.asked());
        assert_eq!(n.token_count(), 3);
    }

    #[test]
    fn keeps_digits_and_decimal_points() {
        assert_eq!(normalize("Más de 1500.50 €").as_str(), "mas de 1500.50 €");
    }

    #[test]
    fn empty_and_blank_input_normalize_to_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize(" \t\n ¡!¿? ").is_empty());
        assert!(!normalize("¡hola!").asked());
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(input in "\\PC{0,40}") {
            let once = normalize_str(&input);
            let twice = normalize_str(&once);
            prop_assert_eq!(&once, &twice, "not idempotent for {:?}", input);
        }

        #[test]
        fn normalized_text_has_no_stray_punctuation_or_double_spaces(input in "[a-zA-ZáéíóúÑñ¿?¡!,;: \t]{0,40}") {
            let out = normalize_str(&input);
            prop_assert!(!out.chars().any(|c| STRAY_PUNCTUATION.contains(&c)));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
