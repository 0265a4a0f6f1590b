use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Default period of the session clock
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Recurring scheduled callback driving the session clock.
///
/// Armed state is `next_fire`; the host polls `due` and fires one tick per
/// whole period elapsed.
#[derive(Debug, Clone)]
pub struct Countdown {
    period: Duration,
    next_fire: Option<Instant>,
}

impl Countdown {
    /// Periods shorter than a millisecond are rounded up to one.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_fire: None,
        }
    }

    /// Arms the schedule. Refuses to arm twice.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.next_fire.is_some() {
            return Err(Error::TimerAlreadyRunning);
        }
        self.next_fire = Some(now + self.period);
        Ok(())
    }

    /// Disarms the schedule. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        self.next_fire.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Number of periods that elapsed up to `now`; advances the schedule past them.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_fire else {
            return 0;
        };

        let mut fired = 0;
        while next <= now {
            fired += 1;
            next += self.period;
        }
        self.next_fire = Some(next);
        fired
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
