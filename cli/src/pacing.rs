use std::thread;
use std::time::{Duration, Instant};

use dinorun_core::RunConfig;

/// Holds a loop to a fixed tick rate.
pub struct FramePacer {
    interval: Duration,
    next: Instant,
}

impl FramePacer {
    pub fn new(tick_rate: u32) -> Self {
        let interval = Duration::from_secs(1) / tick_rate.max(1);
        FramePacer {
            interval,
            next: Instant::now() + interval,
        }
    }

    /// Paced at the run's own tick rate.
    pub fn for_run(config: &RunConfig) -> Self {
        Self::new(config.tick_rate)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next tick boundary. A loop that fell more than one
    /// interval behind restarts its schedule from now instead of bursting.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.interval;
        } else if now - self.next > self.interval {
            self.next = now + self.interval;
        } else {
            self.next += self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_matches_tick_rate() {
        assert_eq!(FramePacer::new(60).interval(), Duration::from_secs(1) / 60);
        assert_eq!(FramePacer::new(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn follows_the_run_tick_rate() {
        let mut config = dinorun_core::default_config(1);
        assert_eq!(
            FramePacer::for_run(&config).interval(),
            Duration::from_secs(1) / 60
        );
        config.tick_rate = 30;
        assert_eq!(
            FramePacer::for_run(&config).interval(),
            Duration::from_secs(1) / 30
        );
    }

    #[test]
    fn waits_roughly_one_interval() {
        let mut pacer = FramePacer::new(100);
        let start = Instant::now();
        for _ in 0..3 {
            pacer.wait();
        }
        assert!(start.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn resyncs_after_stall() {
        let mut pacer = FramePacer::new(10);
        thread::sleep(Duration::from_millis(250));
        pacer.wait();
        assert!(pacer.next > Instant::now());
    }
}
