use core::time::Duration;

/// Single board axis, used for row and column counts.
pub type Coord = u8;

/// Count type used for card and pair counts.
pub type CardCount = u16;

/// Whole seconds on the round clock.
pub type Seconds = u32;

/// Two-dimensional board position `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Delay between two countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long both cards of a mismatched pair stay visible.
pub const REVEAL_DELAY: Duration = Duration::from_millis(700);

pub const fn mult(a: Coord, b: Coord) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}
