//! Mirror event emitter port.
//!
//! This port abstracts progress reporting, allowing the engine to emit
//! events without coupling to how they are displayed.

use crate::mirror::MirrorEvent;

/// Port for emitting mirror events.
pub trait MirrorEventEmitterPort {
    /// Emit an event. Must not fail.
    fn emit(&self, event: MirrorEvent);
}

/// A no-op emitter for tests and library contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMirrorEmitter;

impl NoopMirrorEmitter {
    /// Create a new no-op emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MirrorEventEmitterPort for NoopMirrorEmitter {
    fn emit(&self, _event: MirrorEvent) {
        // Intentionally do nothing
    }
}
