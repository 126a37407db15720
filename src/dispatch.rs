//! Dispatcher: raw engine events in, host callback invocations out.
//!
//! Translation copies only the fields defined for the resolved kind.
//! The callback invocation is the one place host code runs on the
//! reactor thread, so it is wrapped in a panic boundary: a failing
//! handler is reported and swallowed, never allowed to unwind into the
//! engine's pump or take the reactor down with it.

use std::panic::{self, AssertUnwindSafe};

use tracing::{error, trace};

use crate::event::{tag, Event, RawEvent};
use crate::registry::Registry;

/// Map a raw engine event to the host-facing record.
///
/// Tags with no host-visible mapping yield `None`; not every native
/// event type surfaces to the host.
pub fn translate(raw: &RawEvent) -> Option<Event> {
    let event = match raw.tag {
        tag::ADD_MONITOR => Event::AddMonitor {
            id: raw.monitor,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
        },
        tag::UPDATE_MONITOR => Event::UpdateMonitor {
            id: raw.monitor,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
        },
        tag::REMOVE_MONITOR => Event::RemoveMonitor {
            id: raw.monitor,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
        },
        tag::ADD_WINDOW => Event::AddWindow { id: raw.window },
        tag::UPDATE_WINDOW => Event::UpdateWindow { id: raw.window },
        tag::REMOVE_WINDOW => Event::RemoveWindow { id: raw.window },
        tag::REARRANGE => Event::Rearrange,
        tag::MOUSE_DOWN => Event::MouseDown {
            id: raw.window,
            x: raw.x,
            y: raw.y,
            button: raw.button,
            state: raw.state,
        },
        tag::MOUSE_DRAG => Event::MouseDrag {
            id: raw.window,
            x: raw.x,
            y: raw.y,
            move_x: raw.move_x,
            move_y: raw.move_y,
        },
        tag::CONFIGURE_REQUEST => Event::ConfigureRequest {
            id: raw.window,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
            above: raw.above,
            detail: raw.detail,
            value_mask: raw.value_mask,
        },
        tag::KEY_PRESS => Event::KeyPress {
            x: raw.x,
            y: raw.y,
            keysym: raw.keysym,
            keycode: raw.keycode,
            modifier: raw.modifier,
        },
        tag::ENTER_NOTIFY => Event::EnterNotify {
            id: raw.window,
            x: raw.x,
            y: raw.y,
            x_root: raw.x_root,
            y_root: raw.y_root,
        },
        tag::FULLSCREEN => Event::Fullscreen,
        _ => return None,
    };
    Some(event)
}

/// Deliver one raw engine event to the host.
///
/// Unmapped tags and kinds without a registered callback are no-ops.
/// The callback runs synchronously on the calling (reactor) thread; a
/// panic inside it is captured here and logged, and dispatch returns
/// normally so the rest of the pump batch proceeds.
pub fn dispatch(registry: &mut Registry, raw: &RawEvent) {
    let Some(event) = translate(raw) else {
        trace!("Dropping native event with unmapped tag {}", raw.tag);
        return;
    };

    let kind = event.kind();
    let Some(callback) = registry.slot_mut(kind) else {
        return;
    };

    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(&event))) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!("Host callback for '{}' panicked: {}", kind.name(), message);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::event::EventKind;

    #[test]
    fn configure_request_copies_every_field() {
        let raw = RawEvent {
            tag: tag::CONFIGURE_REQUEST,
            window: 42,
            x: 10,
            y: 20,
            width: 300,
            height: 200,
            above: 0,
            detail: 0,
            value_mask: 15,
            // Fields outside the kind's shape must not leak through.
            keysym: 999,
            button: 3,
            ..RawEvent::default()
        };

        assert_eq!(
            translate(&raw),
            Some(Event::ConfigureRequest {
                id: 42,
                x: 10,
                y: 20,
                width: 300,
                height: 200,
                above: 0,
                detail: 0,
                value_mask: 15,
            })
        );
    }

    #[test]
    fn every_defined_tag_translates_to_its_kind() {
        let pairs = [
            (tag::ADD_MONITOR, EventKind::AddMonitor),
            (tag::UPDATE_MONITOR, EventKind::UpdateMonitor),
            (tag::REMOVE_MONITOR, EventKind::RemoveMonitor),
            (tag::ADD_WINDOW, EventKind::AddWindow),
            (tag::UPDATE_WINDOW, EventKind::UpdateWindow),
            (tag::REMOVE_WINDOW, EventKind::RemoveWindow),
            (tag::REARRANGE, EventKind::Rearrange),
            (tag::MOUSE_DOWN, EventKind::MouseDown),
            (tag::MOUSE_DRAG, EventKind::MouseDrag),
            (tag::CONFIGURE_REQUEST, EventKind::ConfigureRequest),
            (tag::KEY_PRESS, EventKind::KeyPress),
            (tag::ENTER_NOTIFY, EventKind::EnterNotify),
            (tag::FULLSCREEN, EventKind::Fullscreen),
        ];
        for (raw_tag, kind) in pairs {
            let raw = RawEvent { tag: raw_tag, ..RawEvent::default() };
            assert_eq!(translate(&raw).map(|e| e.kind()), Some(kind));
        }
    }

    #[test]
    fn unmapped_tags_are_dropped() {
        for raw_tag in [0, 14, 200, u16::MAX] {
            let raw = RawEvent { tag: raw_tag, ..RawEvent::default() };
            assert_eq!(translate(&raw), None);
        }
    }

    #[test]
    fn dispatch_without_registration_is_a_no_op() {
        let mut registry = Registry::new();
        // Must simply return; nothing observable happens.
        dispatch(&mut registry, &RawEvent { tag: tag::REARRANGE, ..RawEvent::default() });
    }

    #[test]
    fn panicking_callback_is_contained() {
        let hits: Rc<RefCell<u32>> = Rc::default();

        let mut registry = Registry::new();
        registry.register("rearrange", Box::new(|_| panic!("handler blew up")));
        let counter = hits.clone();
        registry.register("fullscreen", Box::new(move |_| *counter.borrow_mut() += 1));

        let rearrange = RawEvent { tag: tag::REARRANGE, ..RawEvent::default() };
        let fullscreen = RawEvent { tag: tag::FULLSCREEN, ..RawEvent::default() };

        dispatch(&mut registry, &rearrange);
        dispatch(&mut registry, &fullscreen);
        // The failed handler stays registered and keeps failing without
        // poisoning anything.
        dispatch(&mut registry, &rearrange);
        dispatch(&mut registry, &fullscreen);

        assert_eq!(*hits.borrow(), 2);
    }
}
