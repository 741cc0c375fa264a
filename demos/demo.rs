//! A short seeded drill, end to end.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Seeded deals**: ten hands at each seat from fixed seeds, graded with a
//!    naive "always open" student, so the output is reproducible.
//! 2. **Big blind wording**: the same verdicts in Chinese, where `Open` at the
//!    big blind reads as a call.
//! 3. **Statistics**: accuracy, streak and the most recent mistakes per seat.
//! 4. **Coaching fallback**: with no advisor configured the fixed message is
//!    shown instead.

use preflop_trainer::trainer::{
    helpers::{accuracy_str, action_label, feedback_message, hand_str},
    Action, Locale, OfflineAdvisor, Position, RangeTable, Trainer,
};

const HANDS_PER_SEAT: usize = 10;

fn drill(position: Position, seed: u64, locale: Locale) -> Trainer {
    let mut trainer = Trainer::with_table(position, RangeTable::default(), Some(seed), locale);
    for i in 0..HANDS_PER_SEAT {
        if i > 0 {
            trainer.deal();
        }
        let Some(hand) = trainer.hand().cloned() else { continue };
        let Some(feedback) = trainer.decide(Action::Open) else { continue };
        println!(
            "  {:<6} {:<4} chose {:<6} {}",
            hand_str(&hand),
            hand,
            action_label(feedback.chosen, position, locale),
            feedback_message(&feedback, position, locale),
        );
    }
    trainer
}

fn main() {
    for (seed, position) in Position::ALL.into_iter().enumerate() {
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  {}  (seed {})", position.full_name(), seed);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        let trainer = drill(position, seed as u64, Locale::English);

        let stats = trainer.stats(position);
        println!(
            "\n  {}/{} correct ({}), streak {}, {} mistakes kept\n",
            stats.correct,
            stats.total,
            accuracy_str(stats),
            stats.streak,
            stats.mistakes.len(),
        );
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  大盲位 (seed 5)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let trainer = drill(Position::BB, 5, Locale::Chinese);

    if let Some(advice) = trainer.advice(&OfflineAdvisor) {
        println!("\n  {}", advice);
    }
}
