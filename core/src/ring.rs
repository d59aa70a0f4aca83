//! Fixed-capacity, newest-first buffer.
//!
//! Eviction happens on insert, so `len() <= capacity()` holds after
//! every call.

use std::collections::VecDeque;

/// Capacity of the round history.
pub const HISTORY_CAPACITY: usize = 50;
/// Capacity of the log-line buffer.
pub const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct BoundedLog<T> {
    items:    VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedLog capacity must be > 0");
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert as the newest entry, evicting the oldest when full.
    /// Returns the evicted entry, if any.
    pub fn push_front(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_back()
        } else {
            None
        };
        self.items.push_front(item);
        evicted
    }

    /// Newest entry.
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> BoundedLog<T> {
    /// Owned newest-first copy, for snapshots.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_is_first() {
        let mut log = BoundedLog::with_capacity(3);
        log.push_front(1);
        log.push_front(2);
        assert_eq!(log.front(), Some(&2));
        assert_eq!(log.to_vec(), vec![2, 1]);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = BoundedLog::with_capacity(3);
        for i in 1..=3 {
            assert_eq!(log.push_front(i), None);
        }
        assert_eq!(log.push_front(4), Some(1));
        assert_eq!(log.to_vec(), vec![4, 3, 2]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut log = BoundedLog::with_capacity(HISTORY_CAPACITY);
        for i in 0..(HISTORY_CAPACITY * 3) {
            log.push_front(i);
            assert!(log.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(log.front(), Some(&(HISTORY_CAPACITY * 3 - 1)));
    }

    #[test]
    fn starts_empty_with_fixed_capacity() {
        let log = BoundedLog::<&str>::with_capacity(2);
        assert!(log.is_empty());
        assert_eq!(log.capacity(), 2);
        assert_eq!(log.front(), None);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn zero_capacity_rejected() {
        let _ = BoundedLog::<u8>::with_capacity(0);
    }
}
