//! Callback registry: one slot per event kind.
//!
//! Registration is last-write-wins and there is no unregister; the
//! table is the sole owner of every stored callback, so overwriting a
//! slot drops the previous handler.

use tracing::warn;

use crate::event::{Event, EventKind};

/// A host callback. Invoked with the event record as its sole
/// argument; any result the host computes is its own business.
pub type Callback = Box<dyn FnMut(&Event)>;

/// Fixed table mapping each [`EventKind`] to at most one callback.
pub struct Registry {
    slots: [Option<Callback>; EventKind::COUNT],
}

impl Registry {
    /// Create a registry with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Register `callback` under the event kind named `name`.
    ///
    /// An unknown name mutates nothing and signals nothing to the
    /// caller; it is only reported on the log, since a host probing
    /// names it does not know is indistinguishable from a typo here.
    pub fn register(&mut self, name: &str, callback: Callback) {
        match EventKind::from_name(name) {
            Some(kind) => {
                self.slots[kind.slot()] = Some(callback);
            }
            None => {
                warn!("Ignoring callback registration for unknown event name: {name:?}");
            }
        }
    }

    /// The callback registered for `kind`, if any.
    pub fn slot_mut(&mut self, kind: EventKind) -> Option<&mut Callback> {
        self.slots[kind.slot()].as_mut()
    }

    /// Whether a callback is registered for `kind`.
    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.slots[kind.slot()].is_some()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn register_fills_exactly_the_named_slot() {
        let mut registry = Registry::new();
        registry.register("keyPress", Box::new(|_| {}));

        for kind in EventKind::ALL {
            assert_eq!(registry.is_registered(kind), kind == EventKind::KeyPress);
        }
    }

    #[test]
    fn unknown_name_mutates_no_slot() {
        let mut registry = Registry::new();
        registry.register("keypress", Box::new(|_| {}));
        registry.register("onKeyPress", Box::new(|_| {}));

        for kind in EventKind::ALL {
            assert!(!registry.is_registered(kind));
        }
    }

    #[test]
    fn second_registration_replaces_the_first() {
        let hits: Rc<RefCell<Vec<&'static str>>> = Rc::default();

        let mut registry = Registry::new();
        let first = hits.clone();
        registry.register("rearrange", Box::new(move |_| first.borrow_mut().push("first")));
        let second = hits.clone();
        registry.register("rearrange", Box::new(move |_| second.borrow_mut().push("second")));

        let callback = registry.slot_mut(EventKind::Rearrange).unwrap();
        callback(&Event::Rearrange);
        callback(&Event::Rearrange);

        assert_eq!(*hits.borrow(), vec!["second", "second"]);
    }
}
