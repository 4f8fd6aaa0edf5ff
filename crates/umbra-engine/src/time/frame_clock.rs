/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Animation time after this tick.
    pub time: f64,

    /// Monotonic frame counter, starting at 0 for the first tick.
    pub frame_index: u64,
}

/// Fixed-step frame clock.
///
/// Time is derived as `ticks * step` in `f64` rather than accumulated, so it
/// keeps advancing by `step` however long the clock runs. Narrow it to `f32`
/// only where the GPU needs it.
#[derive(Debug, Clone)]
pub struct FrameClock {
    ticks: u64,
    step: f64,
}

impl FrameClock {
    pub const DEFAULT_STEP: f32 = 0.05;

    /// Creates a clock at time zero advancing by `step` per tick.
    pub fn new(step: f32) -> Self {
        debug_assert!(step > 0.0 && step.is_finite());
        Self {
            ticks: 0,
            step: f64::from(step),
        }
    }

    /// Current animation time (time of the last tick).
    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.step
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.ticks
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let frame_index = self.ticks;
        self.ticks = self.ticks.wrapping_add(1);

        FrameTime {
            time: self.time(),
            frame_index,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = FrameClock::DEFAULT_STEP as f64;

    #[test]
    fn first_tick_is_one_step() {
        let mut clock = FrameClock::new(0.05);
        let ft = clock.tick();
        assert_eq!(ft.time, STEP);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn time_is_strictly_increasing() {
        let mut clock = FrameClock::default();
        let mut last = clock.time();
        for _ in 0..1000 {
            let t = clock.tick().time;
            assert!(t > last);
            last = t;
        }
        assert_eq!(clock.frames(), 1000);
    }

    #[test]
    fn step_stays_exact_after_a_long_run() {
        // ~97 hours at 60 Hz puts the time at 2^20.
        let mut clock = FrameClock {
            ticks: 20_971_520,
            step: STEP,
        };
        let before = clock.time();
        assert!((before - 1_048_576.0).abs() < 1e-3);

        let after = clock.tick().time;
        assert!(after > before);
        assert!((after - before - STEP).abs() < 1e-6);
    }

    #[test]
    fn step_is_not_quantized_at_half_a_million() {
        let mut clock = FrameClock {
            ticks: 10_485_760,
            step: STEP,
        };
        let before = clock.time();
        let after = clock.tick().time;
        assert!((after - before - STEP).abs() < 1e-6);
    }
}
