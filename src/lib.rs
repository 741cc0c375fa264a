//! # preflop_trainer
//!
//! A drill for 6-max preflop decisions.
//!
//! The trainer deals a starting hand at a chosen seat, takes one of three
//! decisions (Fold, Open, 3-Bet) and grades it against a fixed range chart.
//! At the big blind the chart is a defence against a button open, so `Open`
//! there means "call" and 3-betting is right for the value hands.
//!
//! ## How it works
//!
//! 1. [`deal_hand`] draws a hand with realistic category frequencies: pairs,
//!    suited and offsuit hands appear in proportion to their share of the 1326
//!    two-card combinations, not 1-in-169.
//! 2. [`evaluate`] looks the hand's label up in the [`RangeTable`] for the seat
//!    and returns the single correct [`Action`].
//! 3. [`SessionState`] folds each graded decision into per-position
//!    [`Statistics`] (correct, total, streak and the last 20 mistakes).
//!    [`Trainer`] owns a session plus its RNG for interactive use.
//!
//! ## Key features
//!
//! - **Deterministic**: seed the RNG (`rng_seed: Some(u64)`) to replay the
//!   exact same deals.
//! - **Substitutable charts**: load an equivalent chart from JSON; a missing
//!   seat or malformed label is rejected at load time.
//! - **Localized text**: English and Chinese labels, with the big blind's
//!   `Open` shown as "Call".
//! - **Coaching**: an [`Advisor`] can explain a graded hand; failures always
//!   fall back to a fixed message and never touch the grade.
//!
//! ## Quick start
//!
//! ```rust
//! use preflop_trainer::{evaluate, Action, Locale, Position, RangeTable, Trainer, Verdict};
//!
//! // Pure lookups against the built-in chart:
//! assert_eq!(evaluate("A2s", Position::BTN), Action::Open);
//! assert_eq!(evaluate("A2s", Position::UTG), Action::Fold);
//! assert_eq!(evaluate("AKo", Position::BB), Action::ThreeBet);
//!
//! // A seeded session at the cutoff:
//! let mut trainer = Trainer::with_table(Position::CO, RangeTable::default(), Some(42), Locale::English);
//! let label = trainer.hand().map(|h| h.label().to_string()).unwrap_or_default();
//! let right = evaluate(&label, Position::CO);
//! let feedback = trainer.decide(right).expect("first decision on a fresh hand is graded");
//! assert_eq!(feedback.verdict, Verdict::Correct);
//! assert_eq!(trainer.stats(Position::CO).streak, 1);
//! ```

pub mod trainer;

// Convenience re-exports so callers can use `preflop_trainer::evaluate`
// directly without reaching into `trainer::`.
pub use trainer::{
    deal_hand, evaluate, Action, Advisor, Card, Category, Feedback, Hand, Locale, Position,
    RangeTable, SessionState, Statistics, Trainer, TrainerConfig, Verdict,
};
