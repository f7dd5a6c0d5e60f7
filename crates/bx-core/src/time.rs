//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter at a fixed resolution of
//! one simulated second.  The only mapping to wall-clock time is the opening
//! time held in `SimClock`:
//!
//!   wall_time = opening_secs + tick
//!
//! Integer ticks keep every duration computation exact; there is no
//! floating-point drift between arrival, assignment and completion stamps.

use std::fmt;

/// Seconds after midnight of the default opening time (08:00).
pub const DEFAULT_OPENING_SECS: u32 = 8 * 3_600;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick (simulated second since opening).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The explicit clock value threaded through every phase of a tick.
///
/// Each run owns its own `SimClock`; there is no ambient "current time".
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds after midnight that tick 0 corresponds to.
    pub opening_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(opening_secs: u32) -> Self {
        Self {
            opening_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Wall-clock (hours, minutes, seconds) of `tick`, wrapping past midnight.
    pub fn wall_hms(&self, tick: Tick) -> (u32, u32, u32) {
        let secs = (self.opening_secs as u64 + tick.0) % 86_400;
        ((secs / 3_600) as u32, ((secs % 3_600) / 60) as u32, (secs % 60) as u32)
    }

    /// `HH:MM:SS` rendering of `tick`.
    pub fn wall_time(&self, tick: Tick) -> String {
        let (h, m, s) = self.wall_hms(tick);
        format!("{h:02}:{m:02}:{s:02}")
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_OPENING_SECS)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.wall_time(self.current_tick))
    }
}
