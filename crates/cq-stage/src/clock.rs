/// Tracks stage time: a monotonic tick counter and elapsed seconds.
#[derive(Debug, Clone, Default)]
pub struct StageClock {
    tick: u64,
    elapsed: f64,
}

impl StageClock {
    /// A clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `dt` seconds. Returns the new tick number.
    /// Negative or non-finite steps count as zero seconds.
    pub fn advance(&mut self, dt: f64) -> u64 {
        self.tick += 1;
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.tick
    }

    /// Current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seconds elapsed since the stage was built.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advance_accumulates() {
        let mut clock = StageClock::new();
        assert_eq!(clock.tick(), 0);
        clock.advance(0.25);
        assert_eq!(clock.advance(0.5), 2);
        assert!((clock.elapsed_seconds() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn clock_ignores_bad_steps() {
        let mut clock = StageClock::new();
        clock.advance(-1.0);
        clock.advance(f64::NAN);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.elapsed_seconds(), 0.0);
    }
}
