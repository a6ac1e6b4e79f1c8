//! Cooperative cancellation flag.
//!
//! Set from the Ctrl-C / SIGTERM handler (another thread), read by the
//! polling loop between iterations.  Lock-free, so the handler never
//! contends with the loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle to a shared "please stop" flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    requested: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown.  Safe to call repeatedly and from any thread.
    pub fn cancel(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
