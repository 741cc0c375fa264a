use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Card primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// Fixed cycle used by the sampler when it has to rotate a suit.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades   => 's',
            Suit::Hearts   => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs    => 'c',
        }
    }

    /// Card glyph for terminal display.
    pub fn glyph(self) -> char {
        match self {
            Suit::Spades   => '♠',
            Suit::Hearts   => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs    => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Declared low to high so the derived ordering is the poker ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Highest first, the order rows and columns of a range chart use.
    pub const ALL: [Rank; 13] = [
        Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten,
        Rank::Nine, Rank::Eight, Rank::Seven, Rank::Six, Rank::Five,
        Rank::Four, Rank::Three, Rank::Two,
    ];

    pub fn symbol(self) -> char {
        match self {
            Rank::Two   => '2', Rank::Three => '3', Rank::Four  => '4',
            Rank::Five  => '5', Rank::Six   => '6', Rank::Seven => '7',
            Rank::Eight => '8', Rank::Nine  => '9', Rank::Ten   => 'T',
            Rank::Jack  => 'J', Rank::Queen => 'Q', Rank::King  => 'K',
            Rank::Ace   => 'A',
        }
    }

    /// Inverse of [`Rank::symbol`]. Case-sensitive, like label matching.
    pub fn from_symbol(c: char) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.symbol() == c)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

// ---------------------------------------------------------------------------
// Starting hands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Pair,
    Suited,
    Offsuit,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Pair    => write!(f, "pair"),
            Category::Suited  => write!(f, "suited"),
            Category::Offsuit => write!(f, "offsuit"),
        }
    }
}

/// Canonical shorthand for a hand class: "77", "AKs", "QJo".
///
/// `high` and `low` are swapped if given in the wrong order, so the label
/// never depends on deal order.
pub fn label_for(a: Rank, b: Rank, category: Category) -> String {
    let (high, low) = if a >= b { (a, b) } else { (b, a) };
    match category {
        Category::Pair    => format!("{}{}", high, low),
        Category::Suited  => format!("{}{}s", high, low),
        Category::Offsuit => format!("{}{}o", high, low),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    /// Both cards have the same rank and suit.
    IdenticalCards(Card),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::IdenticalCards(c) => write!(f, "a hand cannot hold {} twice", c),
        }
    }
}

impl std::error::Error for HandError {}

/// Two hole cards with their derived category and label.
///
/// Fields are private: the category and label are always derived from the
/// cards, never supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hand {
    cards: [Card; 2],
    category: Category,
    label: String,
}

impl Hand {
    pub fn new(first: Card, second: Card) -> Result<Hand, HandError> {
        if first == second {
            return Err(HandError::IdenticalCards(first));
        }
        Ok(Hand::from_distinct(first, second))
    }

    /// Caller guarantees the two cards differ.
    pub(crate) fn from_distinct(first: Card, second: Card) -> Hand {
        let cards = [first, second];
        let category = Hand::derive_category(cards);
        let label = label_for(first.rank, second.rank, category);
        Hand { cards, category, label }
    }

    fn derive_category(cards: [Card; 2]) -> Category {
        if cards[0].rank == cards[1].rank {
            Category::Pair
        } else if cards[0].suit == cards[1].suit {
            Category::Suited
        } else {
            Category::Offsuit
        }
    }

    /// Recompute the label from the cards alone.
    pub fn derive_label(&self) -> String {
        label_for(self.cards[0].rank, self.cards[1].rank, Hand::derive_category(self.cards))
    }

    pub fn cards(&self) -> [Card; 2] {
        self.cards
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label)
    }
}

// ---------------------------------------------------------------------------
// Table position
// ---------------------------------------------------------------------------

/// 6-max seats, earliest to act first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    UTG,
    MP,   // Middle position
    CO,   // Cutoff
    BTN,  // Button
    SB,   // Small Blind
    BB,   // Big Blind
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::UTG, Position::MP, Position::CO,
        Position::BTN, Position::SB, Position::BB,
    ];

    /// Index into per-position arrays; matches the order of [`Position::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Position::UTG => "UTG",
            Position::MP  => "MP",
            Position::CO  => "CO",
            Position::BTN => "BTN",
            Position::SB  => "SB",
            Position::BB  => "BB",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Position::UTG => "Under the Gun",
            Position::MP  => "Middle Position",
            Position::CO  => "Cutoff",
            Position::BTN => "Button",
            Position::SB  => "Small Blind",
            Position::BB  => "Big Blind",
        }
    }

    /// The big blind defends against an open instead of raising first in.
    pub fn is_defending(self) -> bool {
        self == Position::BB
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.short_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError(pub String);

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown position '{}' (expected UTG, MP, CO, BTN, SB or BB)", self.0)
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.short_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePositionError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// The three buttons a student can press.
///
/// At the big blind `Open` stands for "continue" (call the open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Open,
    #[serde(rename = "3-Bet", alias = "ThreeBet")]
    ThreeBet,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Fold, Action::Open, Action::ThreeBet];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Action::Fold     => "Fold",
            Action::Open     => "Open",
            Action::ThreeBet => "3-Bet",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActionError(pub String);

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}' (expected fold, open, call or 3-bet)", self.0)
    }
}

impl std::error::Error for ParseActionError {}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" | "f"                          => Ok(Action::Fold),
            "open" | "o" | "call" | "c"           => Ok(Action::Open),
            "3-bet" | "3bet" | "threebet" | "3" | "r" => Ok(Action::ThreeBet),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english"           => Ok(Locale::English),
            "zh" | "cn" | "chinese"    => Ok(Locale::Chinese),
            other => Err(format!("unknown locale '{other}' (expected en or zh)")),
        }
    }
}
