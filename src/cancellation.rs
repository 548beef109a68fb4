//! Cooperative cancellation for batched lookups.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Cloneable flag shared between a caller and an in-flight batch; once
/// cancelled it stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
