//! Search generation tokens
//!
//! Every new search bumps the generation. An outcome is applied only when
//! its generation is still the latest; anything older is stale.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct SearchGeneration {
    current: AtomicU64,
}

impl SearchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its token
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Latest generation handed out
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let generation = SearchGeneration::new();
        let first = generation.advance();
        let second = generation.advance();

        assert!(second > first);
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_starts_at_zero() {
        let generation = SearchGeneration::new();
        assert_eq!(generation.current(), 0);
        assert_eq!(generation.advance(), 1);
    }
}
