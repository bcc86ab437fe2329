//! Query synthesis engine.
//!
//! This module is the *internal entry point* for the pipeline. Each stage lives
//! in its own submodule under `src/engine/`; `crate::api` wires them together
//! around an injected `SchemaKnowledge` + `AliasDictionary`.
//!
//! ## How the parts work together
//!
//! ```text
//! raw text
//!    │  normalize                        (normalize.rs)
//!    v
//! NormalizedText ──────────────┬───────────────────────────┐
//!    │                         │                           │
//!    │ classify (classify.rs)  │ TriggerInfo::scan         │ classic::generate
//!    v                         │ (trigger.rs)              │ (rules/classic.rs)
//! IntentResult                 v                           │
//!    │                 extract (extract.rs)                │
//!    │                   - principal entity                │
//!    │                   - status filters                  │
//!    │                   - temporal / numeric clause rules │
//!    │                         │                           │
//!    └──────────┬──────────────┘                           │
//!               v                                          │
//!     synthesize (synthesize.rs)                           │
//!       Result<SynthesizedQuery, Error>                    │
//!               │                                          │
//!               └──────────────┬───────────────────────────┘
//!                              v
//!                 arbitrate (arbitrate.rs)
//!                   - error            → classic
//!                   - generic + longer → classic
//!                   - sanitize winner  (sanitize.rs)
//!                              │
//!                              v
//!                     single SELECT string
//! ```
//!
//! Every stage is a pure function of its inputs. The only shared state is the
//! compiled rule tables (`once_cell` statics, read-only after first use).
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: lower-casing, accent folding, punctuation and whitespace.
//! - `classify.rs`: keyword scoring, contextual bonuses, semantic overrides.
//! - `trigger.rs`: coarse buckets and key phrases for clause-rule gating.
//! - `extract.rs`: principal entity, statuses and clause rules.
//! - `synthesize.rs`: FROM / projection / WHERE / ORDER BY / LIMIT assembly.
//! - `sanitize.rs`: escape and control-character cleanup, single statement.
//! - `arbitrate.rs`: advanced vs classic decision.
//! - `metrics.rs`: optional per-stage timings.
//!
//! ## Adding new clause rules
//!
//! - Declare the rule with `clause_rule!` under `src/rules/temporal.rs` or
//!   `src/rules/numeric.rs` and list it in that file's `get()`.
//! - Any phrase named in `optional_phrases` must also be listed in
//!   `trigger::KEY_PHRASES`, otherwise the rule never activates.
//!
//! ## Debugging
//!
//! Set `RUST_LOG=consulta=trace` to see every stage decision and rule hit.

#[path = "engine/arbitrate.rs"]
mod arbitrate;
#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/sanitize.rs"]
mod sanitize;
#[path = "engine/synthesize.rs"]
mod synthesize;
#[path = "engine/trigger.rs"]
mod trigger;

pub(crate) use arbitrate::arbitrate;
pub use arbitrate::Source;
pub(crate) use classify::classify;
pub(crate) use extract::extract;
pub use metrics::StageMetrics;
pub(crate) use normalize::{normalize, normalize_str};
pub(crate) use sanitize::{sanitize, sanitize_report};
pub use sanitize::Sanitized;
pub(crate) use synthesize::synthesize;
pub use synthesize::{GENERIC_LIMIT, RANKING_LIMIT, SynthesizedQuery};
pub use trigger::BucketMask;
