//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_unit(&self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

/// Settable clock for testing.
#[cfg(test)]
pub struct FixedClock(pub std::sync::Mutex<DateTime<Utc>>);

#[cfg(test)]
impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(std::sync::Mutex::new(now))
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Cycling random source that counts draws, for testing.
#[cfg(test)]
pub struct SequenceRandom {
    values: Vec<f64>,
    draws: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            draws: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn draws(&self) -> usize {
        self.draws.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_unit(&self) -> f64 {
        let n = self.draws.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.values.is_empty() {
            0.0
        } else {
            self.values[n % self.values.len()]
        }
    }
}
