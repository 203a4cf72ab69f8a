use std::collections::BTreeSet;

use crate::pointer::NormalizedPointer;

/// Handle a listener registers under with a [`PointerEventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A source of pointer-move notifications that listeners subscribe to.
///
/// The source only tracks subscriptions. It never owns the listeners, so the
/// orchestrator that owns both decides when a notification is delivered.
pub trait PointerEventSource {
    /// Hand out a fresh id. Ids are never reused by the same source.
    fn allocate_listener(&mut self) -> ListenerId;

    /// Register `id`. Returns `false` if it was already registered.
    fn subscribe(&mut self, id: ListenerId) -> bool;

    /// Remove `id`. Returns `false` if it was not registered.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;

    fn is_subscribed(&self, id: ListenerId) -> bool;
}

/// Something that reacts to pointer movement by mutating a target it borrows
/// for the duration of the call.
pub trait PointerListener {
    type Target;

    fn listener_id(&self) -> ListenerId;

    fn on_pointer_move(&mut self, target: &mut Self::Target, pointer: NormalizedPointer);
}

/// In-process pointer event source.
///
/// Delivery is synchronous: [`PointerDispatcher::dispatch`] calls the listener
/// before returning, and only when the listener is subscribed.
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    subscribers: BTreeSet<ListenerId>,
    next_id: u64,
    delivered: u64,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one pointer-move notification. Returns whether the listener
    /// was invoked.
    pub fn dispatch<L: PointerListener>(
        &mut self,
        pointer: NormalizedPointer,
        listener: &mut L,
        target: &mut L::Target,
    ) -> bool {
        if !self.subscribers.contains(&listener.listener_id()) {
            tracing::trace!("pointer move dropped: listener not subscribed");
            return false;
        }
        listener.on_pointer_move(target, pointer);
        self.delivered += 1;
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Total notifications delivered since construction.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl PointerEventSource for PointerDispatcher {
    fn allocate_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn subscribe(&mut self, id: ListenerId) -> bool {
        self.subscribers.insert(id)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.subscribers.remove(&id)
    }

    fn is_subscribed(&self, id: ListenerId) -> bool {
        self.subscribers.contains(&id)
    }
}
