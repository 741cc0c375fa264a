//! Weighted starting-hand dealer.
//!
//! Dealing a label uniformly from the 169 hand classes would show pairs far
//! too often. Instead the category is drawn first with its share of the 1326
//! two-card combinations, then concrete cards are picked inside it:
//!
//! | Category | Classes | Combos each | Share   |
//! |----------|---------|-------------|---------|
//! | Pair     | 13      | 6           | ~5.88%  |
//! | Suited   | 78      | 4           | ~23.53% |
//! | Offsuit  | 78      | 12          | ~70.59% |

use rand::Rng;

use crate::trainer::models::{Card, Hand, Rank, Suit};

/// Upper bound of the pair band on the unit interval.
pub const PAIR_CUTOFF: f64 = 0.0588;
/// Upper bound of the suited band (pair share + suited share).
pub const SUITED_CUTOFF: f64 = 0.2941;

/// Deal one starting hand. Never fails; suited and offsuit hands are stored
/// high card first.
pub fn deal_hand<R: Rng + ?Sized>(rng: &mut R) -> Hand {
    let roll: f64 = rng.gen();

    let (first, second) = if roll < PAIR_CUTOFF {
        let rank = pick(rng, &Rank::ALL);
        let (s1, s2) = distinct(rng, &Suit::ALL);
        (Card::new(rank, s1), Card::new(rank, s2))
    } else if roll < SUITED_CUTOFF {
        let suit = pick(rng, &Suit::ALL);
        let (high, low) = ordered(distinct(rng, &Rank::ALL));
        (Card::new(high, suit), Card::new(low, suit))
    } else {
        let (high, low) = ordered(distinct(rng, &Rank::ALL));
        let s1 = rng.gen_range(0..Suit::ALL.len());
        let mut s2 = rng.gen_range(0..Suit::ALL.len());
        if s1 == s2 {
            // Fixed rotation, not a redraw: this branch stays O(1).
            s2 = (s1 + 1) % Suit::ALL.len();
        }
        (Card::new(high, Suit::ALL[s1]), Card::new(low, Suit::ALL[s2]))
    };

    Hand::from_distinct(first, second)
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, pool: &[T]) -> T {
    pool[rng.gen_range(0..pool.len())]
}

/// Two different values from `pool`, redrawing the second on collision.
/// Terminates with probability 1 since `pool` holds at least two values.
fn distinct<T: Copy + PartialEq, R: Rng + ?Sized>(rng: &mut R, pool: &[T]) -> (T, T) {
    let first = pick(rng, pool);
    loop {
        let second = pick(rng, pool);
        if second != first {
            return (first, second);
        }
    }
}

fn ordered((a, b): (Rank, Rank)) -> (Rank, Rank) {
    if a > b { (a, b) } else { (b, a) }
}
