use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// Wall-clock source used to pace captures.
pub trait Clock {
    /// Seconds since an arbitrary fixed origin.
    fn now_secs(&self) -> f64;

    /// Block until `dur` has passed. Only used by [`Baker::run`](crate::Baker::run); tick-driven
    /// hosts never sleep.
    fn sleep(&self, dur: Duration);
}

#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

/// Clock that only moves when told to. Sleeping advances it instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, dur: Duration) {
        self.advance(dur.as_secs_f64());
    }
}
