//! Alias dictionary: canonical domain term -> surface forms.
//!
//! Used only for detection (substring containment against normalized text),
//! never for rewriting. Entries are kept as ordered lists; priority between
//! categories is decided by the extractor, not by the dictionary.

use crate::engine::normalize_str;
use crate::error::ConfigError;
use crate::{EntityKind, StatusToken};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry<K> {
    pub canonical: K,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDictionary {
    pub entities: Vec<AliasEntry<EntityKind>>,
    pub statuses: Vec<AliasEntry<StatusToken>>,
}

impl AliasDictionary {
    /// Parse and validate a dictionary. Variants are normalized on load so
    /// they compare against normalized query text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut dict: AliasDictionary = serde_json::from_str(json)?;
        for entry in &mut dict.entities {
            normalize_variants(&mut entry.variants);
        }
        for entry in &mut dict.statuses {
            normalize_variants(&mut entry.variants);
        }
        validate_table("entity", &dict.entities, &EntityKind::PRIORITY)?;
        validate_table("status", &dict.statuses, &StatusToken::ALL)?;
        Ok(dict)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&json)
    }

    pub fn entity_variants(&self, kind: EntityKind) -> &[String] {
        self.entities.iter().find(|e| e.canonical == kind).map(|e| e.variants.as_slice()).unwrap_or(&[])
    }

    pub fn status_variants(&self, status: StatusToken) -> &[String] {
        self.statuses.iter().find(|e| e.canonical == status).map(|e| e.variants.as_slice()).unwrap_or(&[])
    }
}

fn normalize_variants(variants: &mut Vec<String>) {
    for v in variants.iter_mut() {
        *v = normalize_str(v);
    }
    variants.retain(|v| !v.is_empty());
}

fn validate_table<K>(table: &'static str, entries: &[AliasEntry<K>], required: &[K]) -> Result<(), ConfigError>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.canonical) {
            return Err(ConfigError::DuplicateCanonical { table, key: format!("{:?}", entry.canonical) });
        }
        if entry.variants.is_empty() {
            return Err(ConfigError::EmptyVariants { table, key: format!("{:?}", entry.canonical) });
        }
    }
    if let Some(missing) = required.iter().find(|k| !seen.contains(*k)) {
        return Err(ConfigError::EmptyVariants { table, key: format!("{:?}", missing) });
    }
    Ok(())
}

fn entry<K>(canonical: K, variants: &[&str]) -> AliasEntry<K> {
    AliasEntry { canonical, variants: variants.iter().map(|v| v.to_string()).collect() }
}

impl Default for AliasDictionary {
    fn default() -> Self {
        AliasDictionary {
            entities: vec![
                entry(EntityKind::Customer, &["cliente", "customer", "comprador", "razon social"]),
                entry(EntityKind::Quote, &["presupuesto", "cotizacion", "oferta", "pedido", "quote", "estimate"]),
                entry(
                    EntityKind::LineItem,
                    &["linea", "partida", "articulo", "producto", "detalle", "line item", "item"],
                ),
                entry(
                    EntityKind::Price,
                    &["precio", "importe", "coste", "costo", "monto", "dinero", "price", "amount", "cost"],
                ),
                entry(EntityKind::Date, &["fecha", "dia", "semana", "mes", "date", "day", "week", "month", "year"]),
                entry(
                    EntityKind::Status,
                    &["estado", "situacion", "status", "pendiente", "aprobad", "entregad", "facturad", "rechazad"],
                ),
            ],
            statuses: vec![
                entry(StatusToken::Pending, &["pendiente", "en espera", "sin aprobar", "por aprobar", "pending"]),
                entry(
                    StatusToken::Approved,
                    &["aprobado", "aprobada", "aceptado", "aceptada", "approved", "accepted"],
                ),
                entry(
                    StatusToken::Delivered,
                    &["entregado", "entregada", "enviado", "enviada", "delivered", "shipped"],
                ),
                entry(StatusToken::Invoiced, &["facturado", "facturada", "invoiced", "billed"]),
                entry(
                    StatusToken::Rejected,
                    &["rechazado", "rechazada", "denegado", "denegada", "cancelado", "cancelada", "rejected"],
                ),
            ],
        }
    }
}
