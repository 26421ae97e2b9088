//! Fan-out message bus.
//!
//! A shared model publishes into the bus; each subscribed controller owns the
//! receiving end and drains it on its own schedule, so publishing never calls
//! back into a controller that is currently borrowed.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use slotmap::SlotMap;

use super::event::ListenerId;

pub struct Bus<E> {
    subscribers: SlotMap<ListenerId, Sender<E>>,
}

pub struct BusReceiver<E> {
    rx: Receiver<E>,
}

impl<E: Clone> Bus<E> {
    pub fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
        }
    }

    pub fn subscribe(&mut self) -> (ListenerId, BusReceiver<E>) {
        let (tx, rx) = mpsc::channel();
        let id = self.subscribers.insert(tx);
        (id, BusReceiver { rx })
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn publish(&mut self, event: E) {
        // Receivers dropped without unsubscribing are pruned here.
        self.subscribers
            .retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E: Clone> Default for Bus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> BusReceiver<E> {
    pub fn try_recv(&self) -> Result<E, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn drain(&self) -> Vec<E> {
        let mut out = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            out.push(event);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/bus.rs"]
mod tests;
