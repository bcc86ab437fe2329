//! Static schema knowledge.
//!
//! Table names, the header/line join keys, qualified columns, default
//! projections per entity and the status value table. Loaded once, shared
//! read-only between calls.

use crate::error::ConfigError;
use crate::{EntityKind, StatusToken};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A table and the alias used to qualify its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub alias: String,
}

impl TableRef {
    /// `name alias`, as written in FROM/JOIN.
    pub fn sql(&self) -> String {
        format!("{} {}", self.name, self.alias)
    }

    pub fn qualify(&self, column: &str) -> String {
        format!("{}.{}", self.alias, column)
    }
}

/// Key pair joining the line-items table to the quote header table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinKeys {
    /// Primary key on the header table.
    pub header: String,
    /// Foreign key on the line-items table.
    pub line: String,
}

/// Unqualified column names used by the synthesizer and the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub customer: String,
    pub status: String,
    pub amount: String,
    pub cost: String,
    pub created: String,
    pub line_description: String,
    pub line_quantity: String,
    pub line_price: String,
}

/// Default projection for one entity category, as SQL expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub entity: EntityKind,
    #[serde(default)]
    pub distinct: bool,
    pub columns: Vec<String>,
}

/// Value stored in the status column for a canonical status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusValue {
    pub status: StatusToken,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaKnowledge {
    pub quotes: TableRef,
    pub lines: TableRef,
    pub join: JoinKeys,
    pub columns: Columns,
    pub projections: Vec<Projection>,
    pub statuses: Vec<StatusValue>,
}

impl SchemaKnowledge {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let schema: SchemaKnowledge = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for table in [&self.quotes, &self.lines] {
            if table.name.trim().is_empty() || table.alias.trim().is_empty() {
                return Err(ConfigError::InvalidSchema { reason: "table name and alias must be non-empty".into() });
            }
        }
        if self.quotes.alias == self.lines.alias {
            return Err(ConfigError::InvalidSchema {
                reason: format!("quote and line tables share alias `{}`", self.quotes.alias),
            });
        }
        if self.projection(EntityKind::Quote).is_none_or(|p| p.columns.is_empty()) {
            return Err(ConfigError::InvalidSchema { reason: "quote projection must list at least one column".into() });
        }
        Ok(())
    }

    pub fn projection(&self, entity: EntityKind) -> Option<&Projection> {
        self.projections.iter().find(|p| p.entity == entity)
    }

    pub fn status_value(&self, status: StatusToken) -> Option<&str> {
        self.statuses.iter().find(|s| s.status == status).map(|s| s.value.as_str())
    }

    /// `FROM ...` for the quote header alone.
    pub fn quote_source(&self) -> String {
        self.quotes.sql()
    }

    /// `FROM ...` for line items joined to their header.
    pub fn line_source(&self) -> String {
        format!(
            "{} INNER JOIN {} ON {} = {}",
            self.lines.sql(),
            self.quotes.sql(),
            self.lines.qualify(&self.join.line),
            self.quotes.qualify(&self.join.header),
        )
    }

    pub fn customer_column(&self) -> String {
        self.quotes.qualify(&self.columns.customer)
    }

    pub fn status_column(&self) -> String {
        self.quotes.qualify(&self.columns.status)
    }

    pub fn amount_column(&self) -> String {
        self.quotes.qualify(&self.columns.amount)
    }

    pub fn cost_column(&self) -> String {
        self.quotes.qualify(&self.columns.cost)
    }

    pub fn created_column(&self) -> String {
        self.quotes.qualify(&self.columns.created)
    }

    pub fn line_quantity_column(&self) -> String {
        self.lines.qualify(&self.columns.line_quantity)
    }

    pub fn line_price_column(&self) -> String {
        self.lines.qualify(&self.columns.line_price)
    }
}

impl Default for SchemaKnowledge {
    fn default() -> Self {
        let cols = |cs: &[&str]| cs.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        let status = |status, value: &str| StatusValue { status, value: value.to_string() };

        SchemaKnowledge {
            quotes: TableRef { name: "presupuestos".into(), alias: "p".into() },
            lines: TableRef { name: "presupuesto_lineas".into(), alias: "l".into() },
            join: JoinKeys { header: "id".into(), line: "presupuesto_id".into() },
            columns: Columns {
                customer: "cliente".into(),
                status: "estado".into(),
                amount: "importe".into(),
                cost: "coste".into(),
                created: "fecha".into(),
                line_description: "descripcion".into(),
                line_quantity: "cantidad".into(),
                line_price: "precio".into(),
            },
            projections: vec![
                Projection {
                    entity: EntityKind::Customer,
                    distinct: true,
                    columns: cols(&["p.cliente", "p.contacto", "p.telefono"]),
                },
                Projection {
                    entity: EntityKind::Quote,
                    distinct: false,
                    columns: cols(&["p.id", "p.cliente", "p.estado", "p.importe", "p.fecha"]),
                },
                Projection {
                    entity: EntityKind::LineItem,
                    distinct: false,
                    columns: cols(&["p.id", "p.cliente", "l.descripcion", "l.cantidad", "l.precio"]),
                },
            ],
            statuses: vec![
                status(StatusToken::Pending, "PENDIENTE"),
                status(StatusToken::Approved, "APROBADO"),
                status(StatusToken::Delivered, "ENTREGADO"),
                status(StatusToken::Invoiced, "FACTURADO"),
                status(StatusToken::Rejected, "RECHAZADO"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_joins_lines_to_header() {
        let schema = SchemaKnowledge::default();
        assert_eq!(schema.line_source(), "presupuesto_lineas l INNER JOIN presupuestos p ON l.presupuesto_id = p.id");
        assert_eq!(schema.amount_column(), "p.importe");
        assert_eq!(schema.status_value(StatusToken::Approved), Some("APROBADO"));
    }

    #[test]
    fn bundled_schema_file_matches_defaults() {
        let schema = SchemaKnowledge::from_json(include_str!("../data/schema.json")).unwrap();
        assert_eq!(schema, SchemaKnowledge::default());
    }

    #[test]
    fn rejects_schema_without_quote_projection() {
        let mut schema = SchemaKnowledge::default();
        schema.projections.retain(|p| p.entity != EntityKind::Quote);
        let json = serde_json::to_string(&schema).unwrap();

        let err = SchemaKnowledge::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchema { .. }), "unexpected error: {err}");
    }

    #[test]
    fn rejects_shared_alias() {
        let mut schema = SchemaKnowledge::default();
        schema.lines.alias = "p".into();
        let json = serde_json::to_string(&schema).unwrap();

        assert!(SchemaKnowledge::from_json(&json).is_err());
    }

    #[test]
    fn reports_missing_file() {
        let err = SchemaKnowledge::from_path("/nonexistent/schema.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
