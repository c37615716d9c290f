//! Fan-out of color changes to subscribed listeners.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::color::ColorValue;
use crate::projection::{Changes, Projection};

/// The single event delivered to listeners after a color was committed.
#[derive(Clone, Copy, Debug)]
pub struct ColorChanged<'a> {
    /// The new color.
    pub value: &'a ColorValue,
    /// The projection of the new color.
    pub projection: &'a Projection,
    /// What differs from the projection shown before.
    pub changes: Changes,
}

/// Identifies one subscription so it can be removed again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&ColorChanged<'_>)>;

/// An ordered list of listeners.
///
/// Listeners run in subscription order. A listener may subscribe or
/// unsubscribe while an event is being delivered; a new listener first hears
/// the next event, a removed one hears nothing more.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RefCell<Vec<(Subscription, Listener)>>,
    pending: RefCell<Vec<(Subscription, Listener)>>,
    // Every subscribed id, whether delivered to yet or still pending.
    live: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
}

impl ChangeNotifier {
    /// Add a listener.
    pub fn subscribe(&self, listener: impl FnMut(&ColorChanged<'_>) + 'static) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.live.borrow_mut().push(id);

        let entry: (Subscription, Listener) = (id, Box::new(listener));
        match self.listeners.try_borrow_mut() {
            Ok(mut listeners) => listeners.push(entry),
            Err(_) => self.pending.borrow_mut().push(entry),
        }

        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: Subscription) -> bool {
        {
            let mut live = self.live.borrow_mut();
            let Some(index) = live.iter().position(|s| *s == id) else {
                return false;
            };
            live.remove(index);
        }

        self.pending.borrow_mut().retain(|(s, _)| *s != id);

        // While delivering, the entry is dropped once delivery finishes.
        if let Ok(mut listeners) = self.listeners.try_borrow_mut() {
            listeners.retain(|(s, _)| *s != id);
        }

        true
    }

    /// The number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.live.borrow().len()
    }

    /// Whether there are no subscribed listeners.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to every listener in subscription order.
    pub(crate) fn notify(&self, event: &ColorChanged<'_>) {
        {
            let mut listeners = self.listeners.borrow_mut();
            for (id, listener) in listeners.iter_mut() {
                if !self.live.borrow().contains(id) {
                    continue;
                }
                listener(event);
            }
        }

        self.settle();
    }

    fn settle(&self) {
        let live = self.live.borrow();
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|(id, _)| live.contains(id));
        listeners.append(&mut self.pending.borrow_mut());
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.len())
            .finish()
    }
}
