use crate::config::TICKS_PER_SECOND;

// Counts simulation ticks; the only notion of time the simulation uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationClock {
    ticks: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        SimulationClock::default()
    }

    pub fn tick(&mut self) {
        self.ticks += 1;
    }

    pub fn now(&self) -> u64 {
        self.ticks
    }

    /// Seconds elapsed since `since`, counted in ticks.
    pub fn seconds_since(&self, since: u64) -> f64 {
        self.ticks.saturating_sub(since) as f64 / TICKS_PER_SECOND as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_seconds_since() {
        let mut clock = SimulationClock::new();
        for _ in 0..250 {
            clock.tick();
        }
        assert_eq!(clock.now(), 250);
        assert_approx_eq!(clock.seconds_since(0), 2.5);
        assert_approx_eq!(clock.seconds_since(200), 0.5);
        assert_approx_eq!(clock.seconds_since(300), 0.0);
    }
}
