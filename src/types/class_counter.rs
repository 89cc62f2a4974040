//! Type-safe counter for generating unique class IDs.
//!
//! Wraps id generation so class ids always start at 1, are handed out
//! sequentially, and cannot be confused with ordinary integers.

use std::num::NonZeroU32;

/// Type-safe counter for generating unique class IDs.
///
/// This type ensures that:
/// - Class IDs start at 1 (never 0)
/// - IDs are generated sequentially
/// - The counter cannot be misused as a regular integer
#[derive(Debug, Clone)]
pub struct ClassCounter {
    next_id: NonZeroU32,
}

impl ClassCounter {
    /// Creates a new counter starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: NonZeroU32::new(1).expect("1 is non-zero"),
        }
    }

    /// Generates the next class ID and increments the counter.
    ///
    /// # Panics
    /// Panics if the counter would overflow (after 4 billion classes).
    /// This is a theoretical limit that won't be reached in practice.
    pub fn next_id(&mut self) -> super::ClassId {
        let current = self.next_id;

        // Safe: we start at 1 and won't realistically overflow
        self.next_id = NonZeroU32::new(
            current
                .get()
                .checked_add(1)
                .expect("Class counter overflow - registry has more than 4 billion classes"),
        )
        .expect("Incremented value is non-zero");

        super::ClassId(current.get())
    }

    /// Returns the number of ids generated so far.
    #[must_use]
    pub fn current_count(&self) -> u32 {
        self.next_id.get() - 1
    }
}

impl Default for ClassCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_counter_starts_at_one() {
        let mut counter = ClassCounter::new();
        let first_id = counter.next_id();
        assert_eq!(first_id.0, 1);
    }

    #[test]
    fn test_class_counter_increments() {
        let mut counter = ClassCounter::new();
        let id1 = counter.next_id();
        let id2 = counter.next_id();
        let id3 = counter.next_id();

        assert_eq!(id1.0, 1);
        assert_eq!(id2.0, 2);
        assert_eq!(id3.0, 3);
        assert_eq!(counter.current_count(), 3);
    }

    #[test]
    fn test_default_impl() {
        let counter = ClassCounter::default();
        assert_eq!(counter.current_count(), 0);
    }
}
