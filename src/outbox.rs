//! Outbox
//!
//! Optimistic mutations waiting for the backend. Batches leave strictly in
//! the order they were dispatched and one call is in flight at a time, so
//! a toggle never reaches the store ahead of the insert it depends on.

use std::collections::VecDeque;

use crate::optimistic::{Compensation, Mutation};

/// Mutations applied together, each with its compensation
pub type Batch = Vec<(Mutation, Compensation)>;

#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<Batch>,
    draining: bool,
}

impl Outbox {
    /// Queue a batch. Returns true when nobody is draining yet and the
    /// caller has to start.
    pub fn push(&mut self, batch: Batch) -> bool {
        self.queue.push_back(batch);
        !std::mem::replace(&mut self.draining, true)
    }

    /// Next batch to send; an empty queue ends the drain
    pub fn next_batch(&mut self) -> Option<Batch> {
        let batch = self.queue.pop_front();
        if batch.is_none() {
            self.draining = false;
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(id: &str) -> Batch {
        vec![(Mutation::ToggleTask { id: id.into() }, Compensation::default())]
    }

    fn first_id(batch: &Batch) -> &str {
        match &batch[0].0 {
            Mutation::ToggleTask { id } => id,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_only_first_push_starts_draining() {
        let mut outbox = Outbox::default();
        assert!(outbox.push(batch("a")));
        assert!(!outbox.push(batch("b")));
    }

    #[test]
    fn test_batches_leave_in_dispatch_order() {
        let mut outbox = Outbox::default();
        outbox.push(batch("add"));
        outbox.push(batch("toggle"));

        assert_eq!(first_id(&outbox.next_batch().unwrap()), "add");
        // Dispatched while the first call is in flight
        assert!(!outbox.push(batch("edit")));
        assert_eq!(first_id(&outbox.next_batch().unwrap()), "toggle");
        assert_eq!(first_id(&outbox.next_batch().unwrap()), "edit");
        assert!(outbox.next_batch().is_none());
        assert!(outbox.push(batch("later")));
    }

    #[test]
    fn test_push_after_drain_restarts() {
        let mut outbox = Outbox::default();
        outbox.push(batch("a"));
        outbox.next_batch();
        assert!(outbox.next_batch().is_none());

        assert!(outbox.push(batch("b")));
    }
}
