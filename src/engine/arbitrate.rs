//! Arbitration between the advanced pipeline and the classic generator.

use super::sanitize::{Sanitized, sanitize_report};
use super::synthesize::SynthesizedQuery;
use crate::error::Error;

/// Which generator produced the returned SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The rule pipeline.
    Advanced,
    /// The classic template was more specific than a generic listing.
    Classic,
    /// The rule pipeline failed.
    ClassicFallback,
}

impl Source {
    pub fn name(self) -> &'static str {
        match self {
            Source::Advanced => "advanced",
            Source::Classic => "classic",
            Source::ClassicFallback => "classic (fallback)",
        }
    }
}

/// Pick between `advanced` and `classic` and sanitize the winner.
///
/// A failed pipeline always yields the classic SQL. A successful one loses
/// only when it is the generic listing and the classic SQL is longer.
pub(crate) fn arbitrate(advanced: &Result<SynthesizedQuery, Error>, classic: &str) -> (Source, Sanitized) {
    let query = match advanced {
        Ok(query) => query,
        Err(Error::Synthesis(err)) => {
            tracing::warn!(error = %err, "synthesis failed, using classic generator");
            return (Source::ClassicFallback, sanitize_report(classic));
        }
        Err(Error::Config(err)) => {
            tracing::warn!(error = %err, "configuration error in pipeline, using classic generator");
            return (Source::ClassicFallback, sanitize_report(classic));
        }
    };

    let advanced_sql = sanitize_report(&query.sql);
    if query.is_generic() {
        let classic_sql = sanitize_report(classic);
        if classic_sql.sql.chars().count() > advanced_sql.sql.chars().count() {
            tracing::debug!(
                advanced = advanced_sql.sql.len(),
                classic = classic_sql.sql.len(),
                "generic advanced query, classic template is more specific"
            );
            return (Source::Classic, classic_sql);
        }
    }
    (Source::Advanced, advanced_sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GENERIC_LIMIT;
    use crate::error::SynthesisError;
    use crate::rules::ordering::Ranking;
    use crate::{EntityKind, Intent, StatusToken};

    fn query(sql: &str, ranking: Option<Ranking>, limit: Option<u32>) -> Result<SynthesizedQuery, Error> {
        Ok(SynthesizedQuery { sql: sql.to_string(), intent: Intent::Find, principal: Some(EntityKind::Quote), ranking, limit })
    }

    const LONG_CLASSIC: &str = "SELECT * FROM presupuestos WHERE estado = 'PENDIENTE' AND importe > 0 ORDER BY fecha DESC";

    #[test]
    fn generic_advanced_loses_to_longer_classic() {
        let advanced = query("SELECT * FROM p ORDER BY f DESC LIMIT 20;", None, Some(GENERIC_LIMIT));
        let (source, out) = arbitrate(&advanced, LONG_CLASSIC);
        assert_eq!(source, Source::Classic);
        assert_eq!(out.sql, format!("{LONG_CLASSIC};"));
    }

    #[test]
    fn generic_advanced_beats_shorter_classic() {
        let advanced = query("SELECT * FROM p ORDER BY f DESC LIMIT 20;", None, Some(GENERIC_LIMIT));
        let (source, out) = arbitrate(&advanced, "SELECT 1");
        assert_eq!(source, Source::Advanced);
        assert_eq!(out.sql, "SELECT * FROM p ORDER BY f DESC LIMIT 20;");
    }

    #[test]
    fn specific_advanced_is_kept() {
        let ranked = query("SELECT * FROM p ORDER BY i DESC LIMIT 10;", Some(Ranking::HighestAmount), Some(10));
        assert_eq!(arbitrate(&ranked, LONG_CLASSIC).0, Source::Advanced);

        let count = query("SELECT COUNT(*) AS total FROM p;", None, None);
        assert_eq!(arbitrate(&count, LONG_CLASSIC).0, Source::Advanced);
    }

    #[test]
    fn failure_falls_back_to_classic() {
        let failed = Err(Error::Synthesis(SynthesisError::UnmappedStatus(StatusToken::Pending)));
        let (source, out) = arbitrate(&failed, "SELECT 1\nFROM dual");
        assert_eq!(source, Source::ClassicFallback);
        assert_eq!(out.sql, "SELECT 1 FROM dual;");
    }
}
