//! Modal gate: Closed -> Opening -> Open -> Closing -> Closed.
//!
//! Requests that arrive mid-transition are rejected, never queued. The gate
//! only tracks state and timing; presentation belongs to the host.

use crate::constants::{
    ABOUT_NAME_MARKER, CONTACT_NAME_MARKER, MODAL_CLOSE_DEBOUNCE_MS, MODAL_CLOSE_SECS,
    MODAL_OPEN_SECS, WORK_NAME_MARKER,
};
use crate::error::{InteractionError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalId {
    Work,
    About,
    Contact,
}

impl ModalId {
    pub const ALL: [ModalId; 3] = [ModalId::Work, ModalId::About, ModalId::Contact];

    pub fn as_str(self) -> &'static str {
        match self {
            ModalId::Work => "work",
            ModalId::About => "about",
            ModalId::Contact => "contact",
        }
    }

    /// Naming convention used by the scene author for modal triggers.
    pub fn from_object_name(name: &str) -> Option<Self> {
        if name.contains(WORK_NAME_MARKER) {
            Some(ModalId::Work)
        } else if name.contains(ABOUT_NAME_MARKER) {
            Some(ModalId::About)
        } else if name.contains(CONTACT_NAME_MARKER) {
            Some(ModalId::Contact)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Reported by [`ModalGate::update`] when a transition finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalSettled {
    Opened(ModalId),
    Closed(ModalId),
}

#[derive(Debug, Default)]
pub struct ModalGate {
    phase: ModalPhase,
    active: Option<ModalId>,
    opened_at_ms: Option<f64>,
    remaining: f32,
}

impl ModalGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn active(&self) -> Option<ModalId> {
        self.active
    }

    /// True from the moment an open is accepted until the close transition
    /// has fully finished.
    pub fn is_open(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn in_transition(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Closing)
    }

    /// Visibility in 0..1 for fade/scale presentation.
    pub fn visibility(&self) -> f32 {
        match self.phase {
            ModalPhase::Closed => 0.0,
            ModalPhase::Open => 1.0,
            ModalPhase::Opening => 1.0 - (self.remaining / MODAL_OPEN_SECS).clamp(0.0, 1.0),
            ModalPhase::Closing => (self.remaining / MODAL_CLOSE_SECS).clamp(0.0, 1.0),
        }
    }

    pub fn open(&mut self, id: ModalId, now_ms: f64) -> Result<()> {
        if self.phase != ModalPhase::Closed {
            return Err(InteractionError::ModalBusy);
        }
        self.phase = ModalPhase::Opening;
        self.active = Some(id);
        self.opened_at_ms = Some(now_ms);
        self.remaining = MODAL_OPEN_SECS;
        log::info!("[modal] opening {}", id.as_str());
        Ok(())
    }

    /// Closing a modal that is not the active one is a no-op.
    pub fn close(&mut self, id: ModalId) -> Result<()> {
        if self.in_transition() {
            return Err(InteractionError::ModalBusy);
        }
        if self.phase != ModalPhase::Open || self.active != Some(id) {
            return Ok(());
        }
        self.phase = ModalPhase::Closing;
        self.remaining = MODAL_CLOSE_SECS;
        log::info!("[modal] closing {}", id.as_str());
        Ok(())
    }

    /// Close the active modal unless it opened less than the debounce window
    /// ago.
    pub fn attempt_close(&mut self, now_ms: f64) -> Result<()> {
        let Some(id) = self.active else {
            return Ok(());
        };
        if let Some(opened) = self.opened_at_ms {
            let elapsed_ms = now_ms - opened;
            if elapsed_ms < MODAL_CLOSE_DEBOUNCE_MS {
                return Err(InteractionError::CloseDebounced { elapsed_ms });
            }
        }
        self.close(id)
    }

    pub fn update(&mut self, dt: f32) -> Option<ModalSettled> {
        if !self.in_transition() {
            return None;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return None;
        }
        self.remaining = 0.0;
        let id = self.active?;
        match self.phase {
            ModalPhase::Opening => {
                self.phase = ModalPhase::Open;
                Some(ModalSettled::Opened(id))
            }
            ModalPhase::Closing => {
                self.phase = ModalPhase::Closed;
                self.active = None;
                log::info!("[modal] closed {}", id.as_str());
                Some(ModalSettled::Closed(id))
            }
            _ => None,
        }
    }
}
