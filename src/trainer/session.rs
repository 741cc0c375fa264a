//! Drill session: the current seat, the hand on the table, the last verdict
//! and per-position statistics.
//!
//! [`SessionState`] is a plain value. Every change goes through
//! [`SessionState::apply`], which consumes the old state and returns the new
//! one, so the session can be replayed, snapshotted or shared behind a lock
//! by whoever owns it. [`Trainer`] is the owner used by the terminal front
//! end: it holds the RNG and the range table and feeds events in.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::trainer::{
    advisor::{advise_or_fallback, AdviceRequest, Advisor},
    config::{ConfigError, TrainerConfig},
    models::{Action, Hand, Locale, Position},
    ranges::RangeTable,
    sampler::deal_hand,
};

/// Mistakes kept per position; older ones are dropped first.
pub const MISTAKE_LIMIT: usize = 20;

// ---------------------------------------------------------------------------
// Records and statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub hand: Hand,
    pub position: Position,
    pub chosen: Action,
    pub correct: Action,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl DecisionRecord {
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub correct: u32,
    pub total: u32,
    pub streak: u32,
    /// Newest first.
    pub mistakes: VecDeque<DecisionRecord>,
}

impl Statistics {
    /// Fold one graded decision into the counters.
    pub fn record(mut self, record: DecisionRecord) -> Statistics {
        self.total += 1;
        if record.is_correct() {
            self.correct += 1;
            self.streak += 1;
        } else {
            self.streak = 0;
            self.mistakes.push_front(record);
            self.mistakes.truncate(MISTAKE_LIMIT);
        }
        self
    }

    /// Rounded percentage, 0 before the first decision.
    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 * 100.0 / self.total as f64).round() as u32
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub verdict: Verdict,
    pub chosen: Action,
    pub correct: Action,
}

#[derive(Debug, Clone)]
pub enum Event {
    /// Move to another seat with a freshly dealt hand.
    SelectPosition { position: Position, hand: Hand },
    /// Replace the hand on the table, same seat.
    Deal { hand: Hand },
    /// Grade the student's action on the current hand.
    Decide { action: Action, timestamp: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub position: Position,
    pub hand: Option<Hand>,
    pub feedback: Option<Feedback>,
    stats: [Statistics; 6],
}

impl SessionState {
    pub fn new(position: Position) -> Self {
        SessionState {
            position,
            hand: None,
            feedback: None,
            stats: Default::default(),
        }
    }

    pub fn stats(&self, position: Position) -> &Statistics {
        &self.stats[position.index()]
    }

    /// The current hand has been graded and is waiting for the next deal.
    pub fn is_graded(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn apply(mut self, event: Event, table: &RangeTable) -> SessionState {
        match event {
            Event::SelectPosition { position, hand } => {
                self.position = position;
                self.hand = Some(hand);
                self.feedback = None;
            }
            Event::Deal { hand } => {
                self.hand = Some(hand);
                self.feedback = None;
            }
            Event::Decide { action, timestamp } => {
                // One grade per hand; nothing to grade before the first deal.
                if self.feedback.is_some() {
                    return self;
                }
                let Some(hand) = self.hand.clone() else {
                    return self;
                };
                let correct = table.evaluate(hand.label(), self.position);
                log::debug!(
                    "{:<8}{:<6}chose {:<6}correct {}",
                    self.position, hand.label(), action, correct
                );
                let record = DecisionRecord {
                    hand,
                    position: self.position,
                    chosen: action,
                    correct,
                    timestamp,
                };
                let verdict = if record.is_correct() { Verdict::Correct } else { Verdict::Incorrect };
                let slot = &mut self.stats[self.position.index()];
                *slot = std::mem::take(slot).record(record);
                self.feedback = Some(Feedback { verdict, chosen: action, correct });
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Trainer
// ---------------------------------------------------------------------------

/// Owns a session, its range table and its RNG.
pub struct Trainer {
    state: SessionState,
    table: RangeTable,
    rng: StdRng,
    locale: Locale,
}

impl Trainer {
    /// Build from configuration and deal the first hand.
    pub fn new(config: &TrainerConfig) -> Result<Trainer, ConfigError> {
        config.validate()?;
        let table = match &config.ranges {
            Some(path) => RangeTable::load(path)?,
            None => RangeTable::default(),
        };
        Ok(Trainer::with_table(config.position, table, config.rng_seed, config.locale))
    }

    pub fn with_table(
        position: Position,
        table: RangeTable,
        rng_seed: Option<u64>,
        locale: Locale,
    ) -> Trainer {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let mut trainer = Trainer { state: SessionState::new(position), table, rng, locale };
        trainer.deal();
        trainer
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn table(&self) -> &RangeTable {
        &self.table
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn hand(&self) -> Option<&Hand> {
        self.state.hand.as_ref()
    }

    pub fn stats(&self, position: Position) -> &Statistics {
        self.state.stats(position)
    }

    /// Next hand at the current seat.
    pub fn deal(&mut self) -> Hand {
        let hand = deal_hand(&mut self.rng);
        log::debug!("{:<8}dealt {}", self.state.position, hand.label());
        self.transition(Event::Deal { hand: hand.clone() });
        hand
    }

    /// Deal the next hand, but only once the current one has been graded.
    /// `None` leaves the unanswered hand on the table.
    pub fn next_hand(&mut self) -> Option<Hand> {
        if !self.state.is_graded() {
            return None;
        }
        Some(self.deal())
    }

    /// Switch seats and deal a hand there.
    pub fn select_position(&mut self, position: Position) -> Hand {
        let hand = deal_hand(&mut self.rng);
        log::debug!("{:<8}dealt {}", position, hand.label());
        self.transition(Event::SelectPosition { position, hand: hand.clone() });
        hand
    }

    /// Grade an action. `None` if the current hand was already graded.
    pub fn decide(&mut self, action: Action) -> Option<Feedback> {
        if self.state.is_graded() {
            return None;
        }
        self.transition(Event::Decide { action, timestamp: now_millis() });
        self.state.feedback
    }

    /// Coaching text for the graded hand; `None` until a decision is graded.
    /// Falls back to a fixed message if the advisor fails.
    pub fn advice(&self, advisor: &dyn Advisor) -> Option<String> {
        let hand = self.state.hand.as_ref()?;
        let feedback = self.state.feedback?;
        let request = AdviceRequest {
            hand: hand.clone(),
            position: self.state.position,
            correct: feedback.correct,
            chosen: Some(feedback.chosen),
            locale: self.locale,
        };
        Some(advise_or_fallback(advisor, &request))
    }

    fn transition(&mut self, event: Event) {
        let position = self.state.position;
        let state = std::mem::replace(&mut self.state, SessionState::new(position));
        self.state = state.apply(event, &self.table);
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::models::{Card, Rank, Suit};

    fn hand(a: (Rank, Suit), b: (Rank, Suit)) -> Hand {
        Hand::new(Card::new(a.0, a.1), Card::new(b.0, b.1)).unwrap()
    }

    fn aces() -> Hand {
        hand((Rank::Ace, Suit::Spades), (Rank::Ace, Suit::Hearts))
    }

    fn seven_deuce() -> Hand {
        hand((Rank::Seven, Suit::Clubs), (Rank::Two, Suit::Diamonds))
    }

    fn decide(state: SessionState, action: Action, ts: u64) -> SessionState {
        state.apply(Event::Decide { action, timestamp: ts }, RangeTable::standard())
    }

    fn deal(state: SessionState, hand: Hand) -> SessionState {
        state.apply(Event::Deal { hand }, RangeTable::standard())
    }

    #[test]
    fn correct_decision_extends_streak() {
        let s = deal(SessionState::new(Position::UTG), aces());
        let s = decide(s, Action::Open, 1);
        let stats = s.stats(Position::UTG);
        assert_eq!((stats.correct, stats.total, stats.streak), (1, 1, 1));
        assert!(stats.mistakes.is_empty());
        assert_eq!(s.feedback.map(|f| f.verdict), Some(Verdict::Correct));
    }

    #[test]
    fn mistake_resets_streak_and_is_recorded() {
        let mut s = SessionState::new(Position::UTG);
        for ts in 0..3 {
            s = decide(deal(s, aces()), Action::Open, ts);
        }
        assert_eq!(s.stats(Position::UTG).streak, 3);

        s = decide(deal(s, seven_deuce()), Action::Open, 99);
        let stats = s.stats(Position::UTG);
        assert_eq!((stats.correct, stats.total, stats.streak), (3, 4, 0));
        assert_eq!(stats.mistakes.len(), 1);
        let m = &stats.mistakes[0];
        assert_eq!((m.chosen, m.correct, m.timestamp), (Action::Open, Action::Fold, 99));
        assert_eq!(m.hand.label(), "72o");
    }

    #[test]
    fn mistakes_are_capped_newest_first() {
        let mut s = SessionState::new(Position::CO);
        for ts in 0..(MISTAKE_LIMIT as u64 + 1) {
            s = decide(deal(s, seven_deuce()), Action::ThreeBet, ts);
        }
        let mistakes = &s.stats(Position::CO).mistakes;
        assert_eq!(mistakes.len(), MISTAKE_LIMIT);
        assert_eq!(mistakes.front().map(|m| m.timestamp), Some(MISTAKE_LIMIT as u64));
        // The very first mistake (timestamp 0) was evicted.
        assert_eq!(mistakes.back().map(|m| m.timestamp), Some(1));
    }

    #[test]
    fn a_hand_is_graded_once() {
        let s = decide(deal(SessionState::new(Position::BTN), aces()), Action::Fold, 1);
        let again = decide(s.clone(), Action::Open, 2);
        assert_eq!(again, s);
        assert_eq!(again.stats(Position::BTN).total, 1);
    }

    #[test]
    fn deciding_without_a_hand_is_ignored() {
        let s = SessionState::new(Position::SB);
        assert_eq!(decide(s.clone(), Action::Fold, 1), s);
    }

    #[test]
    fn stats_are_kept_per_position() {
        let s = decide(deal(SessionState::new(Position::BB), aces()), Action::ThreeBet, 1);
        let s = s.apply(
            Event::SelectPosition { position: Position::UTG, hand: seven_deuce() },
            RangeTable::standard(),
        );
        assert!(s.feedback.is_none());
        let s = decide(s, Action::Open, 2);
        assert_eq!(s.stats(Position::BB).streak, 1);
        assert_eq!(s.stats(Position::UTG).streak, 0);
        assert_eq!(s.stats(Position::UTG).mistakes.len(), 1);
        assert_eq!(s.stats(Position::CO).total, 0);
    }

    #[test]
    fn accuracy_is_rounded() {
        let mut stats = Statistics::default();
        assert_eq!(stats.accuracy(), 0);
        stats.correct = 2;
        stats.total = 3;
        assert_eq!(stats.accuracy(), 67);
    }

    #[test]
    fn trainer_deals_on_start_and_grades_once() {
        let mut trainer = Trainer::with_table(Position::BTN, RangeTable::default(), Some(7), Locale::English);
        let label = trainer.hand().map(|h| h.label().to_string()).unwrap();
        let expected = RangeTable::standard().evaluate(&label, Position::BTN);

        let fb = trainer.decide(expected).unwrap();
        assert_eq!(fb.verdict, Verdict::Correct);
        assert!(trainer.decide(Action::Fold).is_none());
        assert_eq!(trainer.stats(Position::BTN).total, 1);

        trainer.deal();
        assert!(trainer.state().feedback.is_none());
    }

    #[test]
    fn trainer_with_seed_is_reproducible() {
        let labels = |seed| {
            let mut t = Trainer::with_table(Position::CO, RangeTable::default(), Some(seed), Locale::English);
            (0..10).map(|_| t.deal().label().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(labels(42), labels(42));
    }

    struct Failing;

    impl Advisor for Failing {
        fn advise(&self, _request: &AdviceRequest) -> Result<String, crate::trainer::advisor::AdviceError> {
            Err(crate::trainer::advisor::AdviceError::Transport("connection refused".into()))
        }
    }

    #[test]
    fn advice_waits_for_a_grade_and_never_touches_it() {
        use crate::trainer::advisor::fallback_message;

        let mut t = Trainer::with_table(Position::BB, RangeTable::default(), Some(4), Locale::Chinese);
        assert_eq!(t.advice(&Failing), None);

        let feedback = t.decide(Action::Fold);
        let before = t.state().clone();
        assert_eq!(t.advice(&Failing), Some(fallback_message(Locale::Chinese)));
        assert_eq!(t.state(), &before);
        assert_eq!(t.state().feedback, feedback);
        assert_eq!(t.stats(Position::BB).total, 1);

        t.deal();
        assert_eq!(t.advice(&Failing), None);
    }

    #[test]
    fn next_hand_requires_a_decision_first() {
        let mut t = Trainer::with_table(Position::SB, RangeTable::default(), Some(8), Locale::English);
        let first = t.hand().cloned();
        assert_eq!(t.next_hand(), None);
        assert_eq!(t.hand().cloned(), first);

        t.decide(Action::Fold);
        let next = t.next_hand();
        assert!(next.is_some());
        assert_eq!(t.hand().cloned(), next);
        assert!(!t.state().is_graded());
    }

    #[test]
    fn select_position_moves_seat_and_clears_feedback() {
        let mut t = Trainer::with_table(Position::UTG, RangeTable::default(), Some(1), Locale::English);
        t.decide(Action::Fold);
        t.select_position(Position::BB);
        assert_eq!(t.position(), Position::BB);
        assert!(t.state().feedback.is_none());
        assert!(t.hand().is_some());
    }
}
