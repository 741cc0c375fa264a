//! Presentation strings shared by the terminal front end and the advisor.
//!
//! Grading never looks at these; they only turn actions, verdicts and hands
//! into text for the student's locale.

use crate::trainer::{
    models::{Action, Hand, Locale, Position},
    ranges::{chart_grid, RangeTable},
    session::{Feedback, Statistics, Verdict},
};

/// Pick the wording for the active locale.
pub fn localized(locale: Locale, english: impl Into<String>, chinese: impl Into<String>) -> String {
    match locale {
        Locale::English => english.into(),
        Locale::Chinese => chinese.into(),
    }
}

/// Button text for an action. At the big blind `Open` reads as a call.
pub fn action_label(action: Action, position: Position, locale: Locale) -> String {
    match (action, position.is_defending()) {
        (Action::Open, true)  => localized(locale, "Call", "跟注"),
        (Action::Open, false) => localized(locale, "Open", "开池"),
        (Action::Fold, _)     => localized(locale, "Fold", "弃牌"),
        (Action::ThreeBet, _) => "3-Bet".to_string(),
    }
}

/// One-line verdict shown after a decision.
pub fn feedback_message(feedback: &Feedback, position: Position, locale: Locale) -> String {
    match feedback.verdict {
        Verdict::Correct => localized(locale, "Correct!", "回答正确！"),
        Verdict::Incorrect => {
            let label = action_label(feedback.correct, position, locale);
            localized(
                locale,
                format!("Incorrect. GTO suggests: {label}"),
                format!("回答错误。GTO 建议：{label}"),
            )
        }
    }
}

/// Cards as rank plus suit glyph, e.g. "A♠ K♥".
pub fn hand_str(hand: &Hand) -> String {
    let [a, b] = hand.cards();
    format!("{}{} {}{}", a.rank, a.suit.glyph(), b.rank, b.suit.glyph())
}

/// [`Statistics::accuracy`] as "57%". A seat with no decisions yet shows a
/// dash, so it reads differently from a seat answered 0% right.
pub fn accuracy_str(stats: &Statistics) -> String {
    if stats.total == 0 {
        "-".to_string()
    } else {
        format!("{}%", stats.accuracy())
    }
}

/// Title line for a seat's chart: the scenario and the share of the 1326
/// combinations that do not fold.
pub fn chart_header(table: &RangeTable, position: Position, locale: Locale) -> String {
    let (scenario, combos) = if position.is_defending() {
        (
            localized(locale, "facing BTN open", "面对按钮位开池"),
            table.bb_value_raise().combos() + table.bb_continue().combos(),
        )
    } else {
        (
            localized(locale, "raise first in", "率先加注"),
            table.rfi(position).combos(),
        )
    };
    format!(
        "{} ({})  {} combos, {:.1}%",
        position.full_name(),
        scenario,
        combos,
        combos as f64 * 100.0 / 1326.0,
    )
}

/// The 13x13 grid as text, one line per row: `R` 3-bet, `O` open or call,
/// `.` fold. The cell matching `current` is marked with `*`.
pub fn chart_rows(table: &RangeTable, position: Position, current: Option<&str>) -> Vec<String> {
    chart_grid()
        .chunks(13)
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let mark = match table.evaluate(&cell.label, position) {
                        Action::ThreeBet => 'R',
                        Action::Open     => 'O',
                        Action::Fold     => '.',
                    };
                    let here = if current == Some(cell.label.as_str()) { '*' } else { ' ' };
                    format!("{:<3}{}{}", cell.label, mark, here)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::models::{Card, Rank, Suit};

    #[test]
    fn big_blind_open_reads_as_call() {
        assert_eq!(action_label(Action::Open, Position::BB, Locale::English), "Call");
        assert_eq!(action_label(Action::Open, Position::BTN, Locale::English), "Open");
        assert_eq!(action_label(Action::Open, Position::BB, Locale::Chinese), "跟注");
        assert_eq!(action_label(Action::Open, Position::UTG, Locale::Chinese), "开池");
        assert_eq!(action_label(Action::ThreeBet, Position::CO, Locale::Chinese), "3-Bet");
    }

    #[test]
    fn incorrect_feedback_names_the_right_action() {
        let fb = Feedback { verdict: Verdict::Incorrect, chosen: Action::Fold, correct: Action::Open };
        assert_eq!(
            feedback_message(&fb, Position::BB, Locale::English),
            "Incorrect. GTO suggests: Call"
        );
        assert_eq!(feedback_message(&fb, Position::CO, Locale::Chinese), "回答错误。GTO 建议：开池");

        let ok = Feedback { verdict: Verdict::Correct, chosen: Action::Open, correct: Action::Open };
        assert_eq!(feedback_message(&ok, Position::CO, Locale::English), "Correct!");
    }

    #[test]
    fn hand_str_uses_glyphs() {
        let hand = Hand::new(
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
        )
        .unwrap();
        assert_eq!(hand_str(&hand), "A♠ K♥");
    }

    #[test]
    fn accuracy_rounds_to_whole_percent() {
        let stats = |correct, total| Statistics { correct, total, ..Statistics::default() };
        assert_eq!(accuracy_str(&stats(0, 0)), "-");
        assert_eq!(accuracy_str(&stats(0, 4)), "0%");
        assert_eq!(accuracy_str(&stats(2, 3)), "67%");
        assert_eq!(accuracy_str(&stats(1, 8)), "13%");
        assert_eq!(accuracy_str(&stats(2, 3)), format!("{}%", stats(2, 3).accuracy()));
    }

    #[test]
    fn chart_header_names_the_big_blind_spot() {
        let table = RangeTable::standard();
        let bb = chart_header(table, Position::BB, Locale::English);
        assert!(bb.contains("facing BTN open"), "{bb}");
        let defended = table.bb_value_raise().combos() + table.bb_continue().combos();
        assert!(bb.contains(&format!("{defended} combos")), "{bb}");

        let utg = chart_header(table, Position::UTG, Locale::English);
        assert!(utg.contains("raise first in"), "{utg}");
        assert!(utg.contains(&format!("{} combos", table.rfi(Position::UTG).combos())));
        assert!(chart_header(table, Position::BB, Locale::Chinese).contains("面对按钮位开池"));
    }

    #[test]
    fn chart_rows_mark_actions_and_the_current_hand() {
        let table = RangeTable::standard();
        let rows = chart_rows(table, Position::BB, Some("54s"));
        assert_eq!(rows.len(), 13);
        assert_eq!(rows.iter().map(|r| r.matches('*').count()).sum::<usize>(), 1);
        assert!(rows.iter().any(|r| r.contains("54sO*")));
        assert!(rows[0].starts_with("AA R "));
        assert!(rows.iter().any(|r| r.contains("72o. ")));

        let unmarked = chart_rows(table, Position::BB, None);
        assert!(unmarked.iter().all(|r| !r.contains('*')));
    }
}
