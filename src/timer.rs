//! Frame-polled timers. Every check takes the current time in milliseconds
//! from the caller; nothing here reads a clock on its own.

use std::ops::RangeInclusive;

use rand::Rng;

/// Blocks an action for `delay_ms` after it was last used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    ready: bool,
    last_used: u64,
    delay_ms: u64,
}

impl Cooldown {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            ready: true,
            last_used: 0,
            delay_ms,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Marks the action as used at `now`.
    pub fn trigger(&mut self, now: u64) {
        self.ready = false;
        self.last_used = now;
    }

    /// Re-arms once enough time has passed since the last use.
    pub fn recharge(&mut self, now: u64) {
        if !self.ready && now.saturating_sub(self.last_used) >= self.delay_ms {
            self.ready = true;
        }
    }

    pub fn reset(&mut self) {
        self.ready = true;
        self.last_used = 0;
    }
}

/// Fires every `period_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    next_at: u64,
}

impl Interval {
    pub fn new(period_ms: u64, now: u64) -> Self {
        Self {
            period_ms,
            next_at: now + period_ms,
        }
    }

    /// True at most once per call when the deadline has passed.
    pub fn poll(&mut self, now: u64) -> bool {
        if now < self.next_at {
            return false;
        }
        self.next_at = now + self.period_ms;
        true
    }

    pub fn restart(&mut self, now: u64) {
        self.next_at = now + self.period_ms;
    }
}

/// Fires once after a random delay, then re-arms with a fresh delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomInterval {
    range_ms: RangeInclusive<u64>,
    next_at: u64,
}

impl RandomInterval {
    pub fn new<R: Rng + ?Sized>(range_ms: RangeInclusive<u64>, now: u64, rng: &mut R) -> Self {
        let mut timer = Self {
            range_ms,
            next_at: now,
        };
        timer.rearm(now, rng);
        timer
    }

    pub fn next_at(&self) -> u64 {
        self.next_at
    }

    pub fn poll<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) -> bool {
        if now < self.next_at {
            return false;
        }
        self.rearm(now, rng);
        true
    }

    pub fn rearm<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) {
        self.next_at = now + rng.gen_range(self.range_ms.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cooldown_needs_the_full_delay() {
        let mut cooldown = Cooldown::new(300);
        assert!(cooldown.is_ready());
        cooldown.trigger(1_000);
        cooldown.recharge(1_000);
        assert!(!cooldown.is_ready());
        cooldown.recharge(1_299);
        assert!(!cooldown.is_ready());
        cooldown.recharge(1_300);
        assert!(cooldown.is_ready());
    }

    #[test]
    fn interval_fires_once_per_period() {
        let mut interval = Interval::new(300, 0);
        assert!(!interval.poll(299));
        assert!(interval.poll(300));
        assert!(!interval.poll(301));
        assert!(!interval.poll(599));
        assert!(interval.poll(600));
    }

    #[test]
    fn random_interval_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut timer = RandomInterval::new(4_000..=8_000, 0, &mut rng);
        let mut now = 0;
        for _ in 0..20 {
            let due = timer.next_at();
            assert!((now + 4_000..=now + 8_000).contains(&due));
            assert!(!timer.poll(due - 1, &mut rng));
            assert!(timer.poll(due, &mut rng));
            now = due;
        }
    }
}
