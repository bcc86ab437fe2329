use crate::engine::{self, Sanitized, Source, StageMetrics, SynthesizedQuery};
use crate::error::{ConfigError, Error, SynthesisError};
use crate::{AliasDictionary, EntitySet, IntentResult, NormalizedText, SchemaKnowledge};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::path::Path;
use std::time::Instant;

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

/// Resolution context.
///
/// With a `reference_date`, temporal phrases render as literal date ranges
/// around that day; without one they stay relative to the database clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    pub reference_date: Option<NaiveDate>,
}

impl Context {
    pub fn anchored(reference_date: NaiveDate) -> Self {
        Self { reference_date: Some(reference_date) }
    }
}

/// The pipeline bound to one schema and one alias dictionary.
///
/// Both are read-only after construction, so an `Engine` can be shared across
/// threads freely.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    schema: SchemaKnowledge,
    aliases: AliasDictionary,
}

/// Everything [`Engine::resolve_verbose_with`] saw on the way to its answer.
#[derive(Debug)]
pub struct ResolveDetails {
    pub text: String,
    pub normalized: NormalizedText,
    pub intent: IntentResult,
    pub entities: EntitySet,
    /// The rule pipeline's query, or why it failed.
    pub advanced: Result<SynthesizedQuery, Error>,
    /// The classic template, before sanitization.
    pub classic: String,
    pub source: Source,
    /// The returned SQL.
    pub sanitized: Sanitized,
    pub metrics: StageMetrics,
}

impl ResolveDetails {
    pub fn sql(&self) -> &str {
        &self.sanitized.sql
    }
}

impl Engine {
    pub fn new(schema: SchemaKnowledge, aliases: AliasDictionary) -> Self {
        Self { schema, aliases }
    }

    /// Load either config from a JSON file, falling back to the built-in one.
    pub fn from_paths(schema: Option<&Path>, aliases: Option<&Path>) -> Result<Self, ConfigError> {
        let schema = match schema {
            Some(path) => SchemaKnowledge::from_path(path)?,
            None => SchemaKnowledge::default(),
        };
        let aliases = match aliases {
            Some(path) => AliasDictionary::from_path(path)?,
            None => AliasDictionary::default(),
        };
        Ok(Self::new(schema, aliases))
    }

    pub fn schema(&self) -> &SchemaKnowledge {
        &self.schema
    }

    pub fn aliases(&self) -> &AliasDictionary {
        &self.aliases
    }

    pub fn extract(&self, text: &NormalizedText, context: &Context) -> EntitySet {
        engine::extract(text, &self.aliases, &self.schema, context)
    }

    pub fn synthesize(
        &self,
        intent: &IntentResult,
        entities: &EntitySet,
        text: &NormalizedText,
    ) -> Result<SynthesizedQuery, SynthesisError> {
        engine::synthesize(intent, entities, text, &self.schema)
    }

    /// Classify, extract and synthesize.
    pub fn advanced(&self, text: &NormalizedText, context: &Context) -> Result<SynthesizedQuery, Error> {
        let intent = engine::classify(text);
        let entities = self.extract(text, context);
        Ok(self.synthesize(&intent, &entities, text)?)
    }

    /// Classic template for `text`, unsanitized.
    pub fn classic(&self, text: &NormalizedText) -> &'static str {
        crate::rules::classic::generate(text)
    }

    /// Resolve `text` to a single sanitized SELECT, relative to the database
    /// clock.
    pub fn resolve(&self, text: &str) -> String {
        self.resolve_with(text, &Context::default())
    }

    pub fn resolve_with(&self, text: &str, context: &Context) -> String {
        let normalized = engine::normalize(text);
        let advanced = self.advanced(&normalized, context);
        let (source, sanitized) = engine::arbitrate(&advanced, self.classic(&normalized));
        tracing::debug!(source = source.name(), sql = %sanitized.sql, "resolved");
        sanitized.sql
    }

    /// Like [`Engine::resolve_with`], keeping every intermediate result and
    /// the per-stage timings.
    pub fn resolve_verbose_with(&self, text: &str, context: &Context) -> ResolveDetails {
        let mut metrics = StageMetrics::default();
        let start = Instant::now();

        let t = Instant::now();
        let normalized = engine::normalize(text);
        metrics.normalize = t.elapsed();

        let t = Instant::now();
        let intent = engine::classify(&normalized);
        metrics.classify = t.elapsed();

        let t = Instant::now();
        let entities = self.extract(&normalized, context);
        metrics.extract = t.elapsed();

        let t = Instant::now();
        let advanced = self.synthesize(&intent, &entities, &normalized).map_err(Error::from);
        metrics.synthesize = t.elapsed();

        let t = Instant::now();
        let classic = self.classic(&normalized);
        metrics.classic = t.elapsed();

        let t = Instant::now();
        let (source, sanitized) = engine::arbitrate(&advanced, classic);
        metrics.sanitize = t.elapsed();

        metrics.total = start.elapsed();

        ResolveDetails {
            text: text.to_string(),
            normalized,
            intent,
            entities,
            advanced,
            classic: classic.to_string(),
            source,
            sanitized,
            metrics,
        }
    }
}

/// Resolve `text` with the built-in schema and aliases.
///
/// # Example
/// ```
/// use consulta::resolve;
///
/// let sql = resolve("cuántos clientes tenemos");
/// assert!(sql.contains("COUNT(DISTINCT"));
/// ```
pub fn resolve(text: &str) -> String {
    DEFAULT_ENGINE.resolve(text)
}

/// Resolve `text` with the built-in schema and aliases and the given context.
pub fn resolve_with(text: &str, context: &Context) -> String {
    DEFAULT_ENGINE.resolve_with(text, context)
}

pub fn resolve_verbose_with(text: &str, context: &Context) -> ResolveDetails {
    DEFAULT_ENGINE.resolve_verbose_with(text, context)
}

pub fn normalize(raw: &str) -> NormalizedText {
    engine::normalize(raw)
}

pub fn classify(text: &NormalizedText) -> IntentResult {
    engine::classify(text)
}

/// Extract with the built-in aliases and schema, relative dates.
pub fn extract(text: &NormalizedText) -> EntitySet {
    DEFAULT_ENGINE.extract(text, &Context::default())
}

pub fn synthesize(
    intent: &IntentResult,
    entities: &EntitySet,
    text: &NormalizedText,
    schema: &SchemaKnowledge,
) -> Result<SynthesizedQuery, SynthesisError> {
    engine::synthesize(intent, entities, text, schema)
}

/// Clean up SQL from any source: escapes, control characters, extra
/// statements. Idempotent.
pub fn sanitize(raw: &str) -> String {
    engine::sanitize(raw)
}

pub fn sanitize_report(raw: &str) -> Sanitized {
    engine::sanitize_report(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Intent, StatusToken};

    #[test]
    fn count_customers() {
        assert_eq!(classify(&normalize("cuántos clientes tenemos")).intent, Intent::Count);
        let sql = resolve("cuántos clientes tenemos");
        assert!(sql.contains("COUNT(DISTINCT"), "{sql}");
        assert!(!sql.contains("GROUP BY"), "{sql}");
    }

    #[test]
    fn sum_of_prices() {
        let sql = resolve("suma total de precios");
        assert!(sql.contains("SUM(p.importe)"), "{sql}");
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn approved_this_month() {
        let sql = resolve("presupuestos aprobados de este mes");
        assert!(
            sql.contains("WHERE p.estado = 'APROBADO' AND MONTH(p.fecha) = MONTH(CURDATE()) AND YEAR(p.fecha)"),
            "{sql}"
        );
    }

    #[test]
    fn trailing_period_keeps_date_filter() {
        let details = resolve_verbose_with("presupuestos aprobados de hoy.", &Context::default());
        assert_eq!(details.entities.temporal.len(), 1);
        let advanced = details.advanced.as_ref().map(|q| q.sql.as_str()).unwrap();
        assert!(advanced.contains("WHERE p.estado = 'APROBADO' AND DATE(p.fecha) = CURDATE()"), "{advanced}");
    }

    #[test]
    fn highest_price() {
        let sql = resolve("presupuestos con mayor precio");
        assert!(sql.contains("ORDER BY p.importe DESC LIMIT 10"), "{sql}");
    }

    #[test]
    fn empty_input_gives_generic_listing() {
        assert_eq!(
            resolve(""),
            "SELECT p.id, p.cliente, p.estado, p.importe, p.fecha FROM presupuestos p ORDER BY p.fecha DESC LIMIT 20;"
        );
    }

    #[test]
    fn longer_classic_template_wins_over_generic() {
        let details = resolve_verbose_with("presupuestos de la semana pasada", &Context::default());
        assert_eq!(details.source, Source::Classic);
        assert!(details.advanced.as_ref().is_ok_and(SynthesizedQuery::is_generic));
        assert_eq!(
            details.sql(),
            "SELECT * FROM presupuestos WHERE YEARWEEK(fecha, 1) = YEARWEEK(CURDATE() - INTERVAL 1 WEEK, 1) \
             ORDER BY fecha DESC;"
        );
    }

    #[test]
    fn synthesis_failure_falls_back_to_classic() {
        let mut schema = SchemaKnowledge::default();
        schema.statuses.retain(|s| s.status != StatusToken::Pending);
        let engine = Engine::new(schema, AliasDictionary::default());

        let details = engine.resolve_verbose_with("presupuestos pendientes", &Context::default());
        assert_eq!(details.source, Source::ClassicFallback);
        assert!(matches!(
            details.advanced,
            Err(Error::Synthesis(SynthesisError::UnmappedStatus(StatusToken::Pending)))
        ));
        assert_eq!(details.sql(), "SELECT * FROM presupuestos WHERE estado = 'PENDIENTE' ORDER BY fecha DESC;");
    }

    #[test]
    fn anchored_context_renders_literal_dates() {
        let context = Context::anchored(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        let sql = resolve_with("presupuestos de hoy", &context);
        assert!(sql.contains("WHERE DATE(p.fecha) = '2024-05-10'"), "{sql}");
        assert!(!sql.contains("CURDATE"), "{sql}");
    }

    #[test]
    fn custom_schema_is_used() {
        let mut schema = SchemaKnowledge::default();
        schema.quotes.name = "quotes".to_string();
        schema.quotes.alias = "q".to_string();
        for projection in &mut schema.projections {
            for column in &mut projection.columns {
                *column = column.replace("p.", "q.");
            }
        }
        let engine = Engine::new(schema, AliasDictionary::default());
        assert_eq!(engine.resolve("cuantos clientes"), "SELECT COUNT(DISTINCT q.cliente) AS total FROM quotes q;");
    }

    #[test]
    fn verbose_details_are_consistent() {
        let details = resolve_verbose_with("muestra los presupuestos más caros", &Context::default());
        assert_eq!(details.normalized.as_str(), "muestra los presupuestos mas caros");
        assert!(details.intent.is_command());
        assert_eq!(details.source, Source::Advanced);
        assert_eq!(details.sql(), resolve("muestra los presupuestos más caros"));
        assert!(details.metrics.stages() <= details.metrics.total);
    }
}
