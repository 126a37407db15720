//! Event taxonomy.
//!
//! [`EventKind`] is the closed set of event categories the bridge can
//! deliver to a host. [`Event`] is the structured, kind-specific record
//! handed to a registered callback. [`RawEvent`] is what the native
//! engine produces: a flat field bag plus a numeric tag, of which only
//! the fields relevant to the tag are meaningful.

use serde::Serialize;

/// The closed set of event categories understood by the bridge.
///
/// The declaration order is fixed and doubles as the callback slot
/// index. Each kind has a stable camelCase name used by hosts when
/// registering callbacks (see [`EventKind::name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AddMonitor,
    UpdateMonitor,
    RemoveMonitor,
    AddWindow,
    UpdateWindow,
    RemoveWindow,
    Rearrange,
    MouseDown,
    MouseDrag,
    ConfigureRequest,
    KeyPress,
    EnterNotify,
    Fullscreen,
}

impl EventKind {
    /// Number of event kinds (and callback slots).
    pub const COUNT: usize = 13;

    /// All kinds in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::AddMonitor,
        Self::UpdateMonitor,
        Self::RemoveMonitor,
        Self::AddWindow,
        Self::UpdateWindow,
        Self::RemoveWindow,
        Self::Rearrange,
        Self::MouseDown,
        Self::MouseDrag,
        Self::ConfigureRequest,
        Self::KeyPress,
        Self::EnterNotify,
        Self::Fullscreen,
    ];

    /// Stable host-facing name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddMonitor => "addMonitor",
            Self::UpdateMonitor => "updateMonitor",
            Self::RemoveMonitor => "removeMonitor",
            Self::AddWindow => "addWindow",
            Self::UpdateWindow => "updateWindow",
            Self::RemoveWindow => "removeWindow",
            Self::Rearrange => "rearrange",
            Self::MouseDown => "mouseDown",
            Self::MouseDrag => "mouseDrag",
            Self::ConfigureRequest => "configureRequest",
            Self::KeyPress => "keyPress",
            Self::EnterNotify => "enterNotify",
            Self::Fullscreen => "fullscreen",
        }
    }

    /// Resolve a host-supplied name. Matching is exact and
    /// case-sensitive; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Callback slot index of this kind.
    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The structured record delivered to a host callback.
///
/// One variant per [`EventKind`], each carrying exactly the fields
/// defined for that kind and nothing else. All fields are fixed-width
/// integers; window identifiers are `u32`, coordinates and extents are
/// `i32`. Serializes with the kind name as the external tag, so hosts
/// that marshal the record (e.g. into a script value) see the same
/// names they register callbacks under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Event {
    /// A monitor appeared.
    AddMonitor { id: i32, x: i32, y: i32, width: i32, height: i32 },

    /// A monitor changed geometry.
    UpdateMonitor { id: i32, x: i32, y: i32, width: i32, height: i32 },

    /// A monitor was disconnected.
    RemoveMonitor { id: i32, x: i32, y: i32, width: i32, height: i32 },

    /// A window was mapped and is now managed.
    AddWindow { id: u32 },

    /// A managed window changed.
    UpdateWindow { id: u32 },

    /// A managed window was destroyed.
    RemoveWindow { id: u32 },

    /// The engine wants the host to recompute the layout.
    Rearrange,

    /// Button press on a window. `button` and `state` are the native
    /// button number and modifier state.
    MouseDown { id: u32, x: i32, y: i32, button: u32, state: u32 },

    /// Pointer drag in progress; `move_x`/`move_y` are the offsets
    /// from the drag origin.
    MouseDrag { id: u32, x: i32, y: i32, move_x: i32, move_y: i32 },

    /// A client asked to configure its window.
    ConfigureRequest {
        id: u32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        above: u32,
        detail: i32,
        value_mask: u32,
    },

    /// A grabbed key was pressed.
    KeyPress { x: i32, y: i32, keysym: u32, keycode: u32, modifier: u32 },

    /// The pointer entered a window.
    EnterNotify { id: u32, x: i32, y: i32, x_root: i32, y_root: i32 },

    /// A window requested fullscreen.
    Fullscreen,
}

impl Event {
    /// The kind this record belongs to.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::AddMonitor { .. } => EventKind::AddMonitor,
            Self::UpdateMonitor { .. } => EventKind::UpdateMonitor,
            Self::RemoveMonitor { .. } => EventKind::RemoveMonitor,
            Self::AddWindow { .. } => EventKind::AddWindow,
            Self::UpdateWindow { .. } => EventKind::UpdateWindow,
            Self::RemoveWindow { .. } => EventKind::RemoveWindow,
            Self::Rearrange => EventKind::Rearrange,
            Self::MouseDown { .. } => EventKind::MouseDown,
            Self::MouseDrag { .. } => EventKind::MouseDrag,
            Self::ConfigureRequest { .. } => EventKind::ConfigureRequest,
            Self::KeyPress { .. } => EventKind::KeyPress,
            Self::EnterNotify { .. } => EventKind::EnterNotify,
            Self::Fullscreen => EventKind::Fullscreen,
        }
    }
}

/// Numeric tags carried by [`RawEvent`].
///
/// The tag space is the engine's, not ours; values outside this set
/// reach the dispatcher and are dropped there.
pub mod tag {
    pub const ADD_MONITOR: u16 = 1;
    pub const UPDATE_MONITOR: u16 = 2;
    pub const REMOVE_MONITOR: u16 = 3;
    pub const ADD_WINDOW: u16 = 4;
    pub const UPDATE_WINDOW: u16 = 5;
    pub const REMOVE_WINDOW: u16 = 6;
    pub const REARRANGE: u16 = 7;
    pub const MOUSE_DOWN: u16 = 8;
    pub const MOUSE_DRAG: u16 = 9;
    pub const CONFIGURE_REQUEST: u16 = 10;
    pub const KEY_PRESS: u16 = 11;
    pub const ENTER_NOTIFY: u16 = 12;
    pub const FULLSCREEN: u16 = 13;
}

/// Raw event as produced by the native engine.
///
/// A single flat payload with a discriminating `tag`; the dispatcher
/// extracts the fields defined for the tag and ignores the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub tag: u16,
    /// Monitor identifier (monitor events only).
    pub monitor: i32,
    /// Window identifier.
    pub window: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub x_root: i32,
    pub y_root: i32,
    pub move_x: i32,
    pub move_y: i32,
    pub keysym: u32,
    pub keycode: u32,
    pub modifier: u32,
    pub button: u32,
    pub state: u32,
    pub above: u32,
    pub detail: i32,
    pub value_mask: u32,
}
