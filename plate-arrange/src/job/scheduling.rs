use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Hands control back to the host scheduler at the suspension points of an arrangement.
///
/// Any `FnMut()` is a yielder, so `|| {}` opts out of yielding.
pub trait Yielder {
    fn yield_point(&mut self);
}

impl<F: FnMut()> Yielder for F {
    fn yield_point(&mut self) {
        self()
    }
}

/// Shared flag through which a caller cancels a running arrangement.
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn closures_are_yielders() {
        let mut count = 0;
        {
            let mut yielder = || count += 1;
            yielder.yield_point();
            yielder.yield_point();
        }
        assert_eq!(count, 2);
    }
}
