// Fires at a fixed interval of simulated time, independent of frame rate.
// Counts up from 0 to interval.

#[derive(Debug, Clone)]
pub struct Cadence {
    pub interval: f32,
    pub elapsed: f32,
}

impl Cadence {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by dt. Returns true at most once per call when the interval has passed,
    /// carrying the remainder into the next period.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.interval {
            self.elapsed %= self.interval;
            return true;
        }
        false
    }

    /// Seconds accumulated in the current period.
    pub fn progress(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_interval_reached() {
        let mut cadence = Cadence::new(0.5);
        assert!(!cadence.tick(0.2));
        assert!(!cadence.tick(0.2));
        assert!(cadence.tick(0.2), "0.6s elapsed should fire a 0.5s cadence");
        assert!((cadence.progress() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_large_step_fires_once() {
        let mut cadence = Cadence::new(1.0);
        assert!(cadence.tick(3.5));
        assert!(!cadence.tick(0.0));
        assert!((cadence.progress() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut cadence = Cadence::new(1.0);
        cadence.tick(-5.0);
        assert_eq!(cadence.progress(), 0.0);
    }
}
