use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use crate::render::compositor::ComposedStrip;

/// Proof that a compose was started; compared against the gate's generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket(u64);

impl RenderTicket {
    /// Generation this ticket was issued for.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Last-write-wins gate in front of the visible strip.
///
/// Every compose takes a ticket with [`RenderGate::begin`]. Only the most
/// recently issued ticket may publish; results of older composes are dropped
/// whenever they settle.
#[derive(Debug, Default)]
pub struct RenderGate {
    generation: AtomicU64,
    latest: Mutex<Option<(RenderTicket, Arc<ComposedStrip>)>>,
}

impl RenderGate {
    /// Create a gate with nothing published.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, invalidating every earlier one.
    pub fn begin(&self) -> RenderTicket {
        RenderTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the newest.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Publish `strip` if `ticket` is still current. Returns whether it was stored.
    pub fn publish(&self, ticket: RenderTicket, strip: Arc<ComposedStrip>) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            tracing::warn!(
                generation = ticket.0,
                "discarding stale strip: a newer compose has started"
            );
            return false;
        }
        *latest = Some((ticket, strip));
        true
    }

    /// The most recently published strip.
    pub fn latest(&self) -> Option<Arc<ComposedStrip>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, strip)| Arc::clone(strip))
    }

    /// Drop the published strip, e.g. when the session resets.
    pub fn clear(&self) {
        self.begin();
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/gate.rs"]
mod tests;
