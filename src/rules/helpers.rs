use regex::Captures;

/// Return capture group `idx` parsed as an integer.
pub fn group_u32(caps: &Captures<'_>, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse::<u32>().ok()
}

/// Return capture group `idx` parsed as a decimal.
pub fn group_f64(caps: &Captures<'_>, idx: usize) -> Option<f64> {
    let v = caps.get(idx)?.as_str().parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Render a parsed number as a SQL literal: integers without a decimal point.
pub fn sql_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 { format!("{}", v as i64) } else { format!("{}", v) }
}

/// True if any of `needles` occurs in `haystack`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// First of `needles` that occurs in `haystack`.
pub fn first_contained(haystack: &str, needles: &[&'static str]) -> Option<&'static str> {
    needles.iter().copied().find(|n| haystack.contains(n))
}

/// True if `needle` occurs in `haystack` bounded by non-alphanumerics.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
