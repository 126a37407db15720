//! Native engine interface.
//!
//! The engine owns the display connection, tracks windows and monitors,
//! and emits [`RawEvent`]s. The bridge only needs the surface below:
//! initialization yielding a pollable descriptor, a pump that drains
//! pending events, the imperative window actions, and key-grab setup.
//! Tests substitute a fake implementation.

use std::os::unix::io::RawFd;

use bitflags::bitflags;

use crate::event::RawEvent;

/// Failure from the native engine's setup path.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Display connection failed: {0}")]
    ConnectionFailed(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

bitflags! {
    /// X11-style modifier masks, as carried by key grabs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT   = 1 << 0;
        const LOCK    = 1 << 1;
        const CONTROL = 1 << 2;
        const MOD1    = 1 << 3;
        const MOD2    = 1 << 4;
        const MOD3    = 1 << 5;
        const MOD4    = 1 << 6;
        const MOD5    = 1 << 7;
    }
}

/// One entry in the configured key-grab set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGrab {
    pub keysym: u32,
    pub modifiers: Modifiers,
}

impl KeyGrab {
    /// Build a grab from the raw integer mask a host passes in.
    /// Unknown mask bits are kept as-is.
    pub const fn new(keysym: u32, modifiers: u32) -> Self {
        Self {
            keysym,
            modifiers: Modifiers::from_bits_retain(modifiers),
        }
    }
}

/// The imperative surface of the native window-management engine.
///
/// `pump` must process every currently pending native event and push
/// each one into `sink` before returning; the bridge performs no
/// batching on top. Action calls return nothing and report nothing:
/// invalid window identifiers are the engine's concern.
pub trait NativeEngine {
    /// Open the display/session and return the descriptor the reactor
    /// should poll for read readiness.
    fn init(&mut self) -> Result<RawFd, EngineError>;

    /// Drain all pending native events into `sink`, in production order.
    fn pump(&mut self, sink: &mut dyn FnMut(RawEvent));

    fn move_window(&mut self, id: u32, x: i32, y: i32);

    fn resize_window(&mut self, id: u32, width: i32, height: i32);

    fn focus_window(&mut self, id: u32);

    fn kill_window(&mut self, id: u32);

    fn configure_window(
        &mut self,
        id: u32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        border_width: i32,
        above: u32,
        detail: i32,
        value_mask: u32,
    );

    fn notify_window(
        &mut self,
        id: u32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        border_width: i32,
        above: u32,
        detail: i32,
        value_mask: u32,
    );

    /// Drop every configured key grab.
    fn clear_key_grabs(&mut self);

    /// Add one key grab. Called once per entry after `clear_key_grabs`
    /// when the host replaces the grab set.
    fn add_key_grab(&mut self, grab: KeyGrab);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_grab_keeps_raw_modifier_bits() {
        let grab = KeyGrab::new(65, 8);
        assert_eq!(grab.modifiers, Modifiers::MOD1);
        assert_eq!(grab.modifiers.bits(), 8);

        // Bits outside the named masks survive untouched.
        let odd = KeyGrab::new(65, 1 << 12);
        assert_eq!(odd.modifiers.bits(), 1 << 12);
    }
}
