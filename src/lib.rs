//! Wmbridge — event bridge between a native window-management engine
//! and a scripting host.
//!
//! The native engine owns the display connection, window/monitor state
//! and input grabs; the host expresses policy (layout, keybindings,
//! focus rules) as callbacks. This crate is the seam between the two:
//!
//! - a closed taxonomy of 13 event kinds with kind-specific records
//!   ([`Event`], [`EventKind`]),
//! - a one-slot-per-kind callback registry ([`Registry`]),
//! - a dispatcher that translates raw engine events and invokes the
//!   matching callback with host failures contained at the boundary,
//! - a reactor binding that polls the engine's descriptor via
//!   `calloop` and pumps the engine on readiness,
//! - stateless forwarders for host-issued window actions.
//!
//! Everything runs on a single reactor thread; registration and
//! dispatch are strictly sequential, so there is no locking anywhere.
//!
//! # Quick start
//! ```no_run
//! use wmbridge::{Bridge, Event, NativeEngine};
//!
//! fn run<E: NativeEngine + 'static>(engine: E) -> Result<(), Box<dyn std::error::Error>> {
//! # /*
//!     ...
//! # */
//! # let mut event_loop = calloop::EventLoop::<Bridge<E>>::try_new()?;
//! # let mut bridge = Bridge::new(engine);
//! bridge.on("addWindow", |event| {
//!     if let Event::AddWindow { id } = event {
//!         println!("managing window {id}");
//!     }
//! });
//! bridge.start(&event_loop.handle())?;
//! event_loop.run(None, &mut bridge, |_| {})?;
//! # Ok(())
//! }
//! ```

pub mod dispatch;
pub mod engine;
pub mod event;
pub mod registry;

pub use engine::{EngineError, KeyGrab, Modifiers, NativeEngine};
pub use event::{Event, EventKind, RawEvent};
pub use registry::{Callback, Registry};

use calloop::generic::Generic;
use calloop::{Interest, LoopHandle, Mode, PostAction};
use tracing::debug;

/// Failure surfaced to the caller of [`Bridge::start`].
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Native engine failed to initialize: {0}")]
    EngineInit(#[from] EngineError),
    #[error("Failed to register the engine descriptor with the event loop: {0}")]
    Reactor(#[source] std::io::Error),
}

/// The host-visible binding instance.
///
/// Owns the engine, the callback table and the configured key-grab
/// set. Callbacks are registered with [`on`](Bridge::on) before
/// [`start`](Bridge::start) wires the engine's descriptor into the
/// reactor; from then on every descriptor wake-up pumps the engine,
/// which may produce an unbounded number of dispatches before control
/// returns to the loop. Start-once lifecycle: restarting a bridge
/// after its event loop is gone is not supported.
pub struct Bridge<E: NativeEngine> {
    engine: E,
    registry: Registry,
    grabs: Vec<KeyGrab>,
}

impl<E: NativeEngine> Bridge<E> {
    /// Create a bridge with every callback slot empty and no
    /// descriptor acquired.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            registry: Registry::new(),
            grabs: Vec::new(),
        }
    }

    /// Register `callback` for the event kind named `name`.
    ///
    /// Last registration wins; an unrecognized name is a no-op (logged,
    /// not signaled — see [`Registry::register`]).
    pub fn on<F>(&mut self, name: &str, callback: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.registry.register(name, Box::new(callback));
    }

    /// Initialize the engine and register its descriptor with the
    /// reactor.
    ///
    /// Engine initialization failure is fatal for the bridge and is
    /// returned to the caller rather than crashing the process. The
    /// inserted source is level-triggered on read readiness and runs
    /// [`pump`](Bridge::pump) on every wake-up.
    pub fn start(&mut self, handle: &LoopHandle<'_, Self>) -> Result<(), BridgeError> {
        let fd = self.engine.init()?;
        debug!("Native engine initialized (descriptor {})", fd);

        handle
            .insert_source(
                Generic::new(fd, Interest::READ, Mode::Level),
                |_, _, bridge| {
                    bridge.pump();
                    Ok(PostAction::Continue)
                },
            )
            .map_err(|e| BridgeError::Reactor(e.into()))?;

        Ok(())
    }

    /// Drive one pump of the engine, dispatching every event it
    /// produces, in production order, on the calling thread.
    pub fn pump(&mut self) {
        let Self { engine, registry, .. } = self;
        engine.pump(&mut |raw| dispatch::dispatch(registry, &raw));
    }

    // ── Action forwarders (host → engine, no validation) ─────────────

    pub fn move_window(&mut self, id: u32, x: i32, y: i32) {
        self.engine.move_window(id, x, y);
    }

    pub fn resize_window(&mut self, id: u32, width: i32, height: i32) {
        self.engine.resize_window(id, width, height);
    }

    pub fn focus_window(&mut self, id: u32) {
        self.engine.focus_window(id);
    }

    pub fn kill_window(&mut self, id: u32) {
        self.engine.kill_window(id);
    }

    pub fn configure_window(
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
    ) {
        self.engine
            .configure_window(id, x, y, width, height, border_width, above, detail, value_mask);
    }

    pub fn notify_window(
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
    ) {
        self.engine
            .notify_window(id, x, y, width, height, border_width, above, detail, value_mask);
    }

    /// Replace the entire key-grab set: the engine's grabs are cleared
    /// and re-added from `grabs`, never merged with the previous set.
    pub fn set_grab_keys(&mut self, grabs: Vec<KeyGrab>) {
        self.engine.clear_key_grabs();
        for grab in &grabs {
            self.engine.add_key_grab(*grab);
        }
        self.grabs = grabs;
    }

    /// The currently configured key grabs.
    pub fn grab_keys(&self) -> &[KeyGrab] {
        &self.grabs
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
