//! Cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Query-only predicate polled by the interpreter once per input line.
pub trait AbortSignal {
    fn should_abort(&self) -> bool;
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverAbort;

impl AbortSignal for NeverAbort {
    fn should_abort(&self) -> bool {
        false
    }
}

impl AbortSignal for AtomicBool {
    fn should_abort(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: AbortSignal + ?Sized> AbortSignal for Arc<T> {
    fn should_abort(&self) -> bool {
        (**self).should_abort()
    }
}

impl<T: AbortSignal + ?Sized> AbortSignal for &T {
    fn should_abort(&self) -> bool {
        (**self).should_abort()
    }
}

/// Adapter for closures.
pub struct AbortFn<F>(pub F);

impl<F: Fn() -> bool> AbortSignal for AbortFn<F> {
    fn should_abort(&self) -> bool {
        (self.0)()
    }
}
