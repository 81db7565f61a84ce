//! Single-writer observable values.
//!
//! An [`Observable`] holds a current value and forwards every write to all
//! live subscribers over unbounded channels. Writes are never conflated:
//! three sequential `set` calls produce three deliveries, in order, which
//! the points pulse (`0 → N → 0`) relies on.

use std::sync::Mutex;

use tokio::sync::mpsc;

/// A value that publishes each change to its subscribers.
///
/// Mutation requires `&mut self`, so only the owner can write. Anyone with
/// a shared reference may read or subscribe.
#[derive(Debug)]
pub struct Observable<T: Clone> {
    value: T,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<T>>>,
}

/// Receiving end of an [`Observable`] subscription.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.publish();
    }

    /// Mutates the value in place and notifies subscribers once.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.value);
        self.publish();
    }

    /// Subscribes to future writes. The current value is delivered first.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        // Cannot fail: the receiver is still alive.
        let _ = sender.send(self.value.clone());
        self.lock_subscribers().push(sender);
        Subscription { receiver }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    fn publish(&mut self) {
        let value = &self.value;
        self.subscribers
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .retain(|sender| sender.send(value.clone()).is_ok());
    }

    fn lock_subscribers(&self) -> std::sync::MutexGuard<'_, Vec<mpsc::UnboundedSender<T>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Subscription<T> {
    /// Returns the next pending value without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next value. `None` once the observable is dropped.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Takes every value delivered so far.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Some(value) = self.try_next() {
            values.push(value);
        }
        values
    }
}
