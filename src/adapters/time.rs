//! Host clock adapter.
//!
//! - `now()`: `std::time::Instant` elapsed since construction (monotonic).
//! - `idle()`: `async-io-mini` reactor timer, so the executor is free
//!   while the loop waits for the next poll.
//! - `DelayNs`: blocking thread sleep, used only for the buzzer hold.

use core::time::Duration;
use std::time::Instant;

use embedded_hal::delay::DelayNs;

use crate::app::ports::TimePort;

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimePort for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    async fn idle(&mut self, period: Duration) {
        async_io_mini::Timer::after(period).await;
    }
}

impl DelayNs for SystemClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}
