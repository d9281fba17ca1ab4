//! Cooperative cancellation
//!
//! The soft-start ramp and the blocking update helper run to completion
//! unless the caller hands them a token. The token is polled once per pulse
//! or tick, never from an interrupt.

use core::sync::atomic::{AtomicBool, Ordering};

/// Source of a cancellation request
pub trait CancelToken {
    /// Check if the running routine should stop
    fn is_cancelled(&self) -> bool;
}

/// Token that never cancels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelToken for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Token backed by a polling closure
#[derive(Debug, Clone, Copy)]
pub struct CancelFn<F>(pub F);

impl<F: Fn() -> bool> CancelToken for CancelFn<F> {
    fn is_cancelled(&self) -> bool {
        (self.0)()
    }
}

impl<T: CancelToken + ?Sized> CancelToken for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_never_cancel() {
        assert!(!NeverCancel.is_cancelled());
    }

    #[test]
    fn test_atomic_flag() {
        let flag = AtomicBool::new(false);
        assert!(!flag.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_closure_token() {
        let polls = Cell::new(0u32);
        let token = CancelFn(|| {
            polls.set(polls.get() + 1);
            polls.get() > 2
        });
        assert!(!token.is_cancelled());
        assert!(!token.is_cancelled());
        assert!(token.is_cancelled());
    }
}
