//! Time sources consumed by time nodes.

use serde::{Deserialize, Serialize};

/// Externally driven time source. Successive calls to [`Clock::now`] must be non-decreasing.
pub trait Clock {
    fn now(&self) -> f32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f32 {
        (**self).now()
    }
}

/// Clock advanced explicitly by the host, one step per frame.
///
/// Backwards moves are ignored so the clock stays monotonic even when the host feeds it
/// jittery or negative deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualClock {
    t: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(t: f32) -> Self {
        Self { t: t.max(0.0) }
    }

    /// Move the clock forward by `dt` seconds. Negative or NaN deltas are ignored.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt > 0.0 {
            self.t += dt;
        }
        self.t
    }

    /// Jump to `t`, unless that would move the clock backwards.
    pub fn set(&mut self, t: f32) {
        if t > self.t {
            self.t = t;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f32 {
        self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_and_ignores_negative_steps() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.advance(0.5), 0.5);
        assert_eq!(clock.advance(-1.0), 0.5);
        assert_eq!(clock.advance(f32::NAN), 0.5);
        assert_eq!(clock.advance(0.25), 0.75);
    }

    #[test]
    fn set_never_rewinds() {
        let mut clock = ManualClock::starting_at(2.0);
        clock.set(1.0);
        assert_eq!(clock.now(), 2.0);
        clock.set(3.5);
        assert_eq!(clock.now(), 3.5);
    }

    #[test]
    fn clock_is_usable_through_a_reference() {
        fn read(c: impl Clock) -> f32 {
            c.now()
        }
        let clock = ManualClock::starting_at(1.25);
        assert_eq!(read(&clock), 1.25);
    }
}
