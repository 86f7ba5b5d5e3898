use std::convert::TryFrom;
use std::time::{Duration, Instant};

/// Counts fixed-length intervals of wall-clock time.
///
/// The first call to `ticks` only records a starting point; every call after that
/// reports how many whole intervals have passed since the last one it counted.
#[derive(Debug, Clone)]
pub struct Timer {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Timer {
            interval,
            last_tick: None,
        }
    }

    /// Returns the number of intervals elapsed by `now` and consumes them.
    ///
    /// Leftover time carries over so the long-run rate stays at one tick per interval
    /// no matter how often this is called.
    pub fn ticks(&mut self, now: Instant) -> u32 {
        let last_tick = match self.last_tick {
            Some(last_tick) => last_tick,
            None => {
                self.last_tick = Some(now);
                return 0;
            }
        };

        let elapsed = now.saturating_duration_since(last_tick);
        let ticks = u32::try_from(elapsed.as_nanos() / self.interval.as_nanos()).unwrap_or(u32::MAX);
        self.last_tick = Some(last_tick + self.interval * ticks);
        ticks
    }
}
