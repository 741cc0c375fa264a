//! Core trainer: dealing, grading and the session that ties them together.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: cards, hands, positions, actions, locale |
//! | `ranges`    | Per-position range charts, JSON loading, the 13x13 grid |
//! | `sampler`   | Combo-weighted starting-hand dealer |
//! | `evaluator` | Single entry point `evaluate()`, the correct action for a hand |
//! | `session`   | Session state with pure transitions, statistics, `Trainer` |
//! | `advisor`   | Optional coaching text with a fail-closed fallback |
//! | `config`    | Trainer configuration and its validation |
//! | `helpers`   | Localized labels and feedback strings |

pub mod advisor;
pub mod config;
pub mod evaluator;
pub mod helpers;
pub mod models;
pub mod ranges;
pub mod sampler;
pub mod session;

// Re-export the public API surface so callers can use
// `trainer::evaluate` without reaching into sub-modules.
pub use advisor::{advise_or_fallback, AdviceError, AdviceRequest, Advisor, OfflineAdvisor};
#[cfg(feature = "gemini")]
pub use advisor::GeminiAdvisor;
pub use config::{AdvisorConfig, ConfigError, TrainerConfig};
pub use evaluator::evaluate;
pub use models::{Action, Card, Category, Hand, HandError, Locale, Position, Rank, Suit};
pub use ranges::{chart_grid, is_in_range, ChartCell, RangeError, RangeSet, RangeTable};
pub use sampler::deal_hand;
pub use session::{
    DecisionRecord, Event, Feedback, SessionState, Statistics, Trainer, Verdict, MISTAKE_LIMIT,
};
