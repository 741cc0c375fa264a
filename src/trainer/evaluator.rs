use crate::trainer::{
    models::{Action, Position},
    ranges::{is_in_range, RangeTable},
};

/// Ground-truth action for a hand label at a position, using the built-in
/// chart. Total: labels the chart does not know fold.
pub fn evaluate(label: &str, position: Position) -> Action {
    RangeTable::standard().evaluate(label, position)
}

impl RangeTable {
    /// Ground-truth action against this table.
    ///
    /// The big blind is graded as a defence against a button open: value
    /// 3-bet hands are checked before continue hands, so the 3-bet tier wins
    /// if an edited chart ever lets the two sets overlap. Every other seat is
    /// graded raise-first-in, where 3-betting is never the answer.
    pub fn evaluate(&self, label: &str, position: Position) -> Action {
        if position.is_defending() {
            if is_in_range(label, self.bb_value_raise()) {
                Action::ThreeBet
            } else if is_in_range(label, self.bb_continue()) {
                Action::Open
            } else {
                Action::Fold
            }
        } else if is_in_range(label, self.rfi(position)) {
            Action::Open
        } else {
            Action::Fold
        }
    }
}
