use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

#[macro_use]
mod macros;
mod aliases;
mod api;
mod engine;
mod error;
mod rules;
mod schema;

pub use aliases::{AliasDictionary, AliasEntry};
pub use api::{
    Context, Engine, ResolveDetails, classify, extract, normalize, resolve, resolve_verbose_with, resolve_with,
    sanitize, sanitize_report, synthesize,
};
pub use engine::{GENERIC_LIMIT, RANKING_LIMIT, Sanitized, Source, StageMetrics, SynthesizedQuery};
pub use error::{ConfigError, Error, Result, SynthesisError};
pub use rules::ordering::Ranking;
pub use schema::{Columns, JoinKeys, Projection, SchemaKnowledge, StatusValue, TableRef};

use crate::engine::BucketMask;

// --- Intent -----------------------------------------------------------------

/// High-level goal inferred from a query.
///
/// The declaration order is the classifier's tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Intent {
    Find,
    Count,
    Sum,
    Compare,
    Group,
    Sort,
    Create,
    Update,
    Delete,
}

impl Intent {
    pub const ALL: [Intent; 9] = [
        Intent::Find,
        Intent::Count,
        Intent::Sum,
        Intent::Compare,
        Intent::Group,
        Intent::Sort,
        Intent::Create,
        Intent::Update,
        Intent::Delete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Intent::Find => "FIND",
            Intent::Count => "COUNT",
            Intent::Sum => "SUM",
            Intent::Compare => "COMPARE",
            Intent::Group => "GROUP",
            Intent::Sort => "SORT",
            Intent::Create => "CREATE",
            Intent::Update => "UPDATE",
            Intent::Delete => "DELETE",
        }
    }
}

bitflags::bitflags! {
    /// Contextual signals noticed while classifying.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IntentFlags: u8 {
        const QUESTION = 1 << 0;
        const COMMAND  = 1 << 1;
        const OVERRIDE = 1 << 2;
    }
}

/// Output of the intent classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    pub intent: Intent,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    /// Keywords that contributed to `intent`, in table order.
    pub matched_keywords: Vec<String>,
    pub flags: IntentFlags,
    /// Set when a semantic override replaced the keyword winner.
    pub override_tag: Option<&'static str>,
}

impl IntentResult {
    pub fn is_question(&self) -> bool {
        self.flags.contains(IntentFlags::QUESTION)
    }

    pub fn is_command(&self) -> bool {
        self.flags.contains(IntentFlags::COMMAND)
    }
}

// --- Entities ---------------------------------------------------------------

/// Domain subject a query is about.
///
/// The declaration order is the principal-entity priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Quote,
    LineItem,
    Price,
    Date,
    Status,
}

impl EntityKind {
    pub const PRIORITY: [EntityKind; 6] = [
        EntityKind::Customer,
        EntityKind::Quote,
        EntityKind::LineItem,
        EntityKind::Price,
        EntityKind::Date,
        EntityKind::Status,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Customer => "CUSTOMER",
            EntityKind::Quote => "QUOTE",
            EntityKind::LineItem => "LINE_ITEM",
            EntityKind::Price => "PRICE",
            EntityKind::Date => "DATE",
            EntityKind::Status => "STATUS",
        }
    }
}

/// Canonical business state of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusToken {
    Pending,
    Approved,
    Delivered,
    Invoiced,
    Rejected,
}

impl StatusToken {
    pub const ALL: [StatusToken; 5] = [
        StatusToken::Pending,
        StatusToken::Approved,
        StatusToken::Delivered,
        StatusToken::Invoiced,
        StatusToken::Rejected,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StatusToken::Pending => "PENDING",
            StatusToken::Approved => "APPROVED",
            StatusToken::Delivered => "DELIVERED",
            StatusToken::Invoiced => "INVOICED",
            StatusToken::Rejected => "REJECTED",
        }
    }
}

/// A WHERE fragment derived from a phrase in the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Phrase of the normalized text that matched.
    pub source: String,
    /// SQL predicate fragment.
    pub predicate: String,
    /// Name of the rule that produced it.
    pub rule: &'static str,
}

/// Everything the extractor found in a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySet {
    pub principal: Option<EntityKind>,
    /// Distinct, in `StatusToken::ALL` order.
    pub statuses: Vec<StatusToken>,
    pub temporal: Vec<Clause>,
    pub numeric: Vec<Clause>,
}

impl EntitySet {
    pub fn is_empty(&self) -> bool {
        self.principal.is_none() && self.statuses.is_empty() && self.temporal.is_empty() && self.numeric.is_empty()
    }
}

// --- Normalized text --------------------------------------------------------

/// Lower-case, accent-free, single-spaced query text without `¿?¡!,;:`.
///
/// Only produced by [`normalize`]. Remembers whether the raw text ended with a
/// question mark, since that signal does not survive normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    asked: bool,
}

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the raw input ended with `?`.
    pub fn asked(&self) -> bool {
        self.asked
    }

    pub fn token_count(&self) -> usize {
        self.text.split(' ').filter(|t| !t.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::ops::Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

// --- Clause rules -----------------------------------------------------------

/// Inputs a clause production may read besides its captures.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClauseEnv<'a> {
    /// Qualified column the predicate compares against.
    pub column: &'a str,
    pub context: &'a Context,
}

pub(crate) type Production = Box<dyn Fn(&Captures<'_>, &ClauseEnv<'_>) -> Option<String> + Send + Sync>;

/// A clause rule: a regex over normalized text and a production that turns
/// the captures into a predicate.
///
/// `buckets` and `optional_phrases` gate activation the same way for every
/// rule table (see `engine::trigger`).
pub(crate) struct ClauseRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub production: Production,
    /// Any one must appear in the input for this rule to activate (OR logic).
    pub optional_phrases: &'static [&'static str],
    /// Rule only activates if the input has all of these buckets.
    pub buckets: BucketMask,
}

impl std::fmt::Debug for ClauseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClauseRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("production", &"<function>")
            .field("buckets", &self.buckets)
            .finish()
    }
}
