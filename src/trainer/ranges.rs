//! Static preflop charts for 6-max cash games.
//!
//! Each position carries a raise-first-in (RFI) set: hands in the set are
//! opened, everything else folds. The big blind additionally carries two
//! disjoint defence sets used against a button open: a value 3-bet set and a
//! continue (call) set. Anything in neither folds.
//!
//! The built-in chart lives in [`RangeTable::standard`]. A substitute chart can
//! be loaded from JSON with [`RangeTable::from_json`]; it is validated when it
//! is built, so a missing position is a load error rather than a lookup miss.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::trainer::models::{label_for, Category, Position, Rank};

// ---------------------------------------------------------------------------
// Range sets
// ---------------------------------------------------------------------------

/// An unordered set of hand labels ("AKs", "77", "QJo").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeSet {
    labels: HashSet<String>,
}

impl RangeSet {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RangeSet { labels: labels.into_iter().map(Into::into).collect() }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Number of two-card combinations the set covers out of 1326.
    pub fn combos(&self) -> usize {
        self.iter()
            .map(|label| match label.len() {
                2 => 6,
                _ if label.ends_with('s') => 4,
                _ => 12,
            })
            .sum()
    }

    fn overlap<'a>(&'a self, other: &'a RangeSet) -> Option<&'a str> {
        self.iter().find(|label| other.contains(label))
    }
}

/// Set-membership test used by the evaluator and the chart.
pub fn is_in_range(label: &str, range: &RangeSet) -> bool {
    range.contains(label)
}

/// True for "AA", "AKs", "AKo" style labels: known rank symbols, high rank
/// first, suffix only on non-pairs.
pub fn is_canonical_label(label: &str) -> bool {
    let chars: Vec<char> = label.chars().collect();
    let (Some(high), Some(low)) = (
        chars.first().copied().and_then(Rank::from_symbol),
        chars.get(1).copied().and_then(Rank::from_symbol),
    ) else {
        return false;
    };
    match chars.len() {
        2 => high == low,
        3 => high > low && matches!(chars[2], 's' | 'o'),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum RangeError {
    /// The chart file could not be read.
    Io(std::io::Error),
    /// The chart is not valid JSON or has the wrong shape.
    Json(serde_json::Error),
    /// The chart has no raise-first-in entry for a position.
    MissingPosition(Position),
    /// A position key that is not one of the six seats.
    UnknownPosition(String),
    /// Two keys name the same seat, e.g. "BTN" and "btn".
    DuplicatePosition(Position),
    /// A label that is not in canonical "AKs" / "77" / "QJo" form.
    InvalidLabel(String),
    /// The big blind value 3-bet and continue sets share a label.
    OverlappingDefence(String),
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Io(e)                 => write!(f, "cannot read range chart: {}", e),
            RangeError::Json(e)               => write!(f, "malformed range chart: {}", e),
            RangeError::MissingPosition(p)    => write!(f, "range chart has no entry for {}", p),
            RangeError::UnknownPosition(s)    => write!(f, "range chart names unknown position '{}'", s),
            RangeError::DuplicatePosition(p)  => write!(f, "range chart has more than one entry for {}", p),
            RangeError::InvalidLabel(s)       => write!(f, "'{}' is not a canonical hand label", s),
            RangeError::OverlappingDefence(s) => {
                write!(f, "'{}' is in both the BB 3-bet and BB continue sets", s)
            }
        }
    }
}

impl std::error::Error for RangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RangeError::Io(e)   => Some(e),
            RangeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RangeError {
    fn from(e: std::io::Error) -> Self {
        RangeError::Io(e)
    }
}

impl From<serde_json::Error> for RangeError {
    fn from(e: serde_json::Error) -> Self {
        RangeError::Json(e)
    }
}

// ---------------------------------------------------------------------------
// Range table
// ---------------------------------------------------------------------------

/// One RFI set per position plus the big blind defence sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeTable {
    rfi: [RangeSet; 6],
    bb_value_raise: RangeSet,
    bb_continue: RangeSet,
}

/// Loose on-disk shape; turned into a [`RangeTable`] only after validation.
#[derive(Debug, Deserialize)]
struct ChartFile {
    rfi: HashMap<String, Vec<String>>,
    bb_value_raise: Vec<String>,
    bb_continue: Vec<String>,
}

static STANDARD: Lazy<RangeTable> = Lazy::new(RangeTable::authored);

impl RangeTable {
    /// Build a table, rejecting malformed labels and overlapping BB sets.
    pub fn new(
        rfi: [RangeSet; 6],
        bb_value_raise: RangeSet,
        bb_continue: RangeSet,
    ) -> Result<RangeTable, RangeError> {
        let table = RangeTable { rfi, bb_value_raise, bb_continue };
        table.validate()?;
        Ok(table)
    }

    /// The built-in chart, shared for the life of the process.
    pub fn standard() -> &'static RangeTable {
        &STANDARD
    }

    pub fn from_json(json: &str) -> Result<RangeTable, RangeError> {
        let file: ChartFile = serde_json::from_str(json)?;

        let mut by_position: HashMap<Position, RangeSet> = HashMap::new();
        for (key, labels) in file.rfi {
            let position = key
                .parse::<Position>()
                .map_err(|_| RangeError::UnknownPosition(key.clone()))?;
            if by_position.insert(position, RangeSet::from_labels(labels)).is_some() {
                return Err(RangeError::DuplicatePosition(position));
            }
        }

        let mut rfi: [RangeSet; 6] = Default::default();
        for position in Position::ALL {
            rfi[position.index()] = by_position
                .remove(&position)
                .ok_or(RangeError::MissingPosition(position))?;
        }

        RangeTable::new(
            rfi,
            RangeSet::from_labels(file.bb_value_raise),
            RangeSet::from_labels(file.bb_continue),
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<RangeTable, RangeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = RangeTable::from_json(&json)?;
        log::info!("loaded range chart from {}", path.display());
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        let sets = self.rfi.iter().chain([&self.bb_value_raise, &self.bb_continue]);
        for set in sets {
            if let Some(bad) = set.iter().find(|label| !is_canonical_label(label)) {
                return Err(RangeError::InvalidLabel(bad.to_string()));
            }
        }
        if let Some(shared) = self.bb_value_raise.overlap(&self.bb_continue) {
            return Err(RangeError::OverlappingDefence(shared.to_string()));
        }
        Ok(())
    }

    /// Raise-first-in set for a position. At the big blind this is only used
    /// to draw the chart; grading uses the defence sets.
    pub fn rfi(&self, position: Position) -> &RangeSet {
        &self.rfi[position.index()]
    }

    pub fn bb_value_raise(&self) -> &RangeSet {
        &self.bb_value_raise
    }

    pub fn bb_continue(&self) -> &RangeSet {
        &self.bb_continue
    }

    /// Skips validation so tests can build tables `new` would reject.
    #[cfg(test)]
    pub(crate) fn with_bb_continue_unchecked(mut self, bb_continue: RangeSet) -> RangeTable {
        self.bb_continue = bb_continue;
        self
    }

    fn authored() -> RangeTable {
        let rfi = [
            RangeSet::from_labels(UTG_RFI.iter().copied()),
            RangeSet::from_labels(MP_RFI.iter().copied()),
            RangeSet::from_labels(CO_RFI.iter().copied()),
            RangeSet::from_labels(BTN_RFI.iter().copied()),
            RangeSet::from_labels(SB_RFI.iter().copied()),
            RangeSet::from_labels(BB_RFI.iter().copied()),
        ];
        RangeTable {
            rfi,
            bb_value_raise: RangeSet::from_labels(BB_VALUE_RAISE.iter().copied()),
            bb_continue: RangeSet::from_labels(BB_CONTINUE.iter().copied()),
        }
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        RangeTable::standard().clone()
    }
}

// ---------------------------------------------------------------------------
// Chart grid
// ---------------------------------------------------------------------------

/// One cell of the 13x13 starting-hand grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartCell {
    pub row: Rank,
    pub col: Rank,
    pub label: String,
    pub category: Category,
}

/// All 169 hand classes, row-major with aces first. Pairs on the diagonal,
/// suited hands above it, offsuit hands below.
pub fn chart_grid() -> Vec<ChartCell> {
    let mut cells = Vec::with_capacity(169);
    for (i, &row) in Rank::ALL.iter().enumerate() {
        for (j, &col) in Rank::ALL.iter().enumerate() {
            let category = match i.cmp(&j) {
                std::cmp::Ordering::Equal   => Category::Pair,
                std::cmp::Ordering::Less    => Category::Suited,
                std::cmp::Ordering::Greater => Category::Offsuit,
            };
            cells.push(ChartCell { row, col, label: label_for(row, col, category), category });
        }
    }
    cells
}

// ---------------------------------------------------------------------------
// Authored chart
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const UTG_RFI: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77",
    "AKs", "AQs", "AJs", "ATs", "KQs", "KJs", "KTs", "QJs", "JTs",
    "AKo", "AQo",
];

#[rustfmt::skip]
const MP_RFI: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "KQs", "KJs", "KTs",
    "QJs", "QTs", "JTs", "J9s", "T9s",
    "AKo", "AQo", "AJo", "KQo",
];

#[rustfmt::skip]
const CO_RFI: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    "KQs", "KJs", "KTs", "K9s", "QJs", "QTs", "Q9s", "JTs", "J9s",
    "T9s", "T8s", "98s", "87s",
    "AKo", "AQo", "AJo", "ATo", "KQo", "KJo", "QJo",
];

#[rustfmt::skip]
const BTN_RFI: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    "KQs", "KJs", "KTs", "K9s", "K8s", "K7s", "K6s", "K5s", "K4s", "K3s", "K2s",
    "QJs", "QTs", "Q9s", "Q8s", "Q6s", "Q5s",
    "JTs", "J9s", "J8s", "T9s", "T8s", "98s", "87s", "76s", "65s", "54s",
    "AKo", "AQo", "AJo", "ATo", "A9o", "A8o", "A7o", "A5o",
    "KQo", "KJo", "KTo", "K9o", "QJo", "QTo", "Q9o", "JTo", "J9o", "T9o",
];

#[rustfmt::skip]
const SB_RFI: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22",
    "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    "KQs", "KJs", "KTs", "K9s", "K8s", "QJs", "QTs", "Q9s", "JTs", "J9s",
    "T9s", "T8s", "98s", "87s", "76s", "65s", "54s",
    "AKo", "AQo", "AJo", "ATo", "A9o", "KQo", "KJo", "KTo", "QJo", "QTo", "JTo",
];

// Nobody raises first in from the big blind. Grading there uses the defence
// sets below; this entry only keeps the table complete for every seat.
#[rustfmt::skip]
const BB_RFI: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "AKs", "AQs", "AJs", "KQs",
];

// Big blind facing a button open.
#[rustfmt::skip]
const BB_VALUE_RAISE: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "AKs", "AKo", "AQs", "AJs", "KQs",
];

#[rustfmt::skip]
const BB_CONTINUE: &[&str] = &[
    "99", "88", "77", "66", "55", "44", "33", "22",
    "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    "KJs", "KTs", "K9s", "K8s", "QJs", "QTs", "Q9s", "JTs", "J9s", "T9s",
    "98s", "87s", "76s", "65s", "54s",
    "AQo", "AJo", "ATo", "A9o", "KQo", "KJo", "KTo", "QJo", "QTo", "JTo",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_json(drop: Option<&str>) -> String {
        let table = RangeTable::standard();
        let rfi: serde_json::Map<String, serde_json::Value> = Position::ALL
            .iter()
            .filter(|p| Some(p.short_name()) != drop)
            .map(|p| {
                let labels: Vec<&str> = table.rfi(*p).iter().collect();
                (p.short_name().to_string(), serde_json::json!(labels))
            })
            .collect();
        let value: Vec<&str> = table.bb_value_raise().iter().collect();
        let cont: Vec<&str> = table.bb_continue().iter().collect();
        serde_json::json!({ "rfi": rfi, "bb_value_raise": value, "bb_continue": cont }).to_string()
    }

    #[test]
    fn standard_chart_is_valid() {
        assert!(RangeTable::standard().validate().is_ok());
    }

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        let utg = RangeTable::standard().rfi(Position::UTG);
        assert!(is_in_range("AKs", utg));
        assert!(!is_in_range("aks", utg));
        assert!(!is_in_range("AK", utg));
        assert!(!is_in_range("not a hand", utg));
    }

    #[test]
    fn ranges_widen_toward_the_button() {
        let t = RangeTable::standard();
        assert!(t.rfi(Position::UTG).len() < t.rfi(Position::MP).len());
        assert!(t.rfi(Position::MP).len() < t.rfi(Position::CO).len());
        assert!(t.rfi(Position::CO).len() < t.rfi(Position::BTN).len());
        for label in t.rfi(Position::UTG).iter() {
            assert!(t.rfi(Position::BTN).contains(label), "{label} opens UTG but not BTN");
        }
    }

    #[test]
    fn bb_defence_sets_are_disjoint() {
        let t = RangeTable::standard();
        for label in t.bb_value_raise().iter() {
            assert!(!t.bb_continue().contains(label), "{label} is in both BB sets");
        }
    }

    #[test]
    fn canonical_labels() {
        for ok in ["AA", "22", "AKs", "72o", "T9s"] {
            assert!(is_canonical_label(ok), "{ok}");
        }
        for bad in ["AK", "KAs", "AAs", "A", "AKx", "akS", "AKso", ""] {
            assert!(!is_canonical_label(bad), "{bad}");
        }
    }

    #[test]
    fn json_chart_round_trips_the_standard_table() {
        let table = RangeTable::from_json(&chart_json(None)).unwrap();
        assert_eq!(&table, RangeTable::standard());
    }

    #[test]
    fn json_chart_missing_a_position_is_rejected() {
        let err = RangeTable::from_json(&chart_json(Some("CO"))).unwrap_err();
        assert!(matches!(err, RangeError::MissingPosition(Position::CO)), "{err}");
    }

    #[test]
    fn json_chart_with_bad_label_or_overlap_is_rejected() {
        let six = r#""UTG": [], "MP": [], "CO": [], "BTN": [], "SB": [], "BB": []"#;

        let bad = format!(r#"{{ "rfi": {{ {six} }}, "bb_value_raise": ["KAs"], "bb_continue": [] }}"#);
        assert!(matches!(RangeTable::from_json(&bad), Err(RangeError::InvalidLabel(l)) if l == "KAs"));

        let overlap = format!(r#"{{ "rfi": {{ {six} }}, "bb_value_raise": ["AA"], "bb_continue": ["AA"] }}"#);
        assert!(matches!(RangeTable::from_json(&overlap), Err(RangeError::OverlappingDefence(_))));

        let unknown = format!(r#"{{ "rfi": {{ {six}, "HJ": [] }}, "bb_value_raise": [], "bb_continue": [] }}"#);
        assert!(matches!(RangeTable::from_json(&unknown), Err(RangeError::UnknownPosition(p)) if p == "HJ"));

        assert!(matches!(RangeTable::from_json("[]"), Err(RangeError::Json(_))));
    }

    #[test]
    fn json_chart_naming_a_seat_twice_is_rejected() {
        let twice = r#"{ "rfi": { "UTG": [], "MP": [], "CO": [], "BTN": ["72o"], "btn": [], "SB": [], "BB": [] },
                         "bb_value_raise": [], "bb_continue": [] }"#;
        // Key order in the parsed map must not decide the outcome.
        for _ in 0..50 {
            assert!(matches!(
                RangeTable::from_json(twice),
                Err(RangeError::DuplicatePosition(Position::BTN))
            ));
        }
    }

    #[test]
    fn grid_covers_every_hand_class_once() {
        let grid = chart_grid();
        assert_eq!(grid.len(), 169);
        let labels: HashSet<&str> = grid.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels.len(), 169);
        assert!(grid.iter().all(|c| is_canonical_label(&c.label)));

        assert_eq!(grid[0].label, "AA");
        assert_eq!(grid[1].label, "AKs");
        assert_eq!(grid[13].label, "AKo");
        assert_eq!(grid[168].label, "22");
        assert_eq!(grid.iter().filter(|c| c.category == Category::Pair).count(), 13);
        assert_eq!(grid.iter().filter(|c| c.category == Category::Suited).count(), 78);
    }

    #[test]
    fn combos_count_hand_weights() {
        let set = RangeSet::from_labels(["AA", "AKs", "AKo"]);
        assert_eq!(set.combos(), 6 + 4 + 12);
    }
}
