/// Handle to a registered subscriber. Detach it with [`Hub::off`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Typed synchronous dispatcher, one per model channel.
///
/// Delivery contract:
/// - `emit` invokes every handler in subscription order before returning, so
///   a model mutator that emits has notified all subscribers by the time it
///   returns to its caller.
/// - a handler detached with `off` is never invoked again, including for
///   events emitted later in the same turn.
///
/// Handlers receive only the event payload, never the emitting model, so a
/// handler cannot write back into the model that is mid-dispatch. Feedback
/// between widgets and models is broken by update-only-if-different guards at
/// the subscriber, not by the dispatcher.
pub struct Hub<E> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for Hub<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Hub<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

impl<E> Hub<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` and returns its detach handle.
    pub fn on(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Detaches a handler.
    ///
    /// Returns `true` if the subscription was still registered.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _)| *hid != id);
        self.handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches `event` to all handlers, in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }
}
