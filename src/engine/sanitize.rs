//! SQL sanitization.
//!
//! Applied to whatever string leaves the engine, and usable on its own for SQL
//! obtained elsewhere. The passes run in a fixed order so that no pass can
//! re-create something an earlier pass removed, which keeps the whole function
//! idempotent:
//!
//! 1. runs of backslashes collapse to one
//! 2. `\'` and `\"` become plain quotes
//! 3. literal `\n` `\r` `\t` `\f` `\v` `\0` become a space
//! 4. control characters (U+0000–U+001F, U+007F–U+009F) become a space
//! 5. whitespace collapses to single spaces, ends trimmed
//! 6. only the first non-empty `;`-separated statement is kept, terminated
//!    with `;`

use regex::NoExpand;

/// Sanitized SQL plus what the statement pass had to drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanitized {
    pub sql: String,
    /// More than one statement was present.
    pub truncated: bool,
    /// Number of non-empty statements discarded after the first.
    pub dropped_statements: usize,
}

pub(crate) fn sanitize(raw: &str) -> String {
    sanitize_report(raw).sql
}

pub(crate) fn sanitize_report(raw: &str) -> Sanitized {
    let text = regex!(r"\\{2,}").replace_all(raw, NoExpand(r"\"));
    let text = text.replace(r"\'", "'").replace(r#"\""#, "\"");
    let text = regex!(r"\\[nrtfv0]").replace_all(&text, NoExpand(" "));
    let text: String = text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut statements = text.split(';').map(str::trim).filter(|s| !s.is_empty());
    let Some(first) = statements.next() else {
        return Sanitized::default();
    };
    let dropped_statements = statements.count();
    let truncated = dropped_statements > 0;
    if truncated {
        tracing::warn!(dropped_statements, "multiple statements in SQL, keeping the first");
    }

    Sanitized { sql: format!("{first};"), truncated, dropped_statements }
}
