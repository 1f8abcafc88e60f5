//! Simulation clock.

/// Game time in seconds, advanced only by [`GameClock::advance`].
///
/// Elapsed time accumulates in `f64` so long sessions do not drift; callers
/// read it narrowed to `f32`. Spawn timers and laser recharge compare
/// against `now()`, so tests can step time exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameClock {
    elapsed: f64,
    dt: f32,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed += f64::from(dt);
        self.dt = dt;
    }

    #[inline]
    pub fn now(&self) -> f32 {
        self.elapsed as f32
    }

    #[inline]
    pub fn elapsed_f64(&self) -> f64 {
        self.elapsed
    }

    /// Length of the last step.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_steps_are_ignored() {
        let mut clock = GameClock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        assert_eq!(clock.now(), 0.5);
        assert_eq!(clock.dt(), 0.0);
    }

    #[test]
    fn an_hour_of_frames_does_not_drift() {
        let mut clock = GameClock::new();
        let dt = 1.0_f32 / 60.0;
        for _ in 0..60 * 3600 {
            clock.advance(dt);
        }
        // Only the f32 rounding of `dt` itself remains.
        let expected = f64::from(dt) * 216_000.0;
        assert!((clock.elapsed_f64() - expected).abs() < 1e-6);
        assert!((clock.now() - 3600.0).abs() < 1e-2, "{}", clock.now());
    }
}
