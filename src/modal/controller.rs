use crate::modal::types::{FormSubmission, PageEffect, PendingAction, TriggerData};
use tracing::{debug, warn};

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DialogPhase {
    #[default]
    Hidden,
    Shown,
    Confirmed,
    Cancelled,
}

/// Drives one shared confirmation dialog through
/// `Hidden -> Shown -> (Confirmed | Cancelled) -> Hidden`.
#[derive(Clone, Debug, Default)]
pub struct ModalController {
    phase: DialogPhase,
    pending: Option<PendingAction>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == DialogPhase::Shown
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Stores the trigger's metadata unvalidated; last show wins.
    pub fn show(&mut self, trigger: &TriggerData) {
        let pending = PendingAction::from_trigger(trigger);
        debug!(?pending, previous = ?self.phase, "confirm dialog shown");
        self.pending = Some(pending);
        self.phase = DialogPhase::Shown;
    }

    /// Consumes the pending action as a POST with fields `id`, `bid`, `action`.
    pub fn confirm(&mut self) -> Option<FormSubmission> {
        if self.phase != DialogPhase::Shown {
            warn!(phase = ?self.phase, "confirm ignored, dialog is not shown");
            return None;
        }

        self.phase = DialogPhase::Confirmed;
        let submission = self.pending.take().unwrap_or_default().into_submission();
        debug!(action = %submission.action, "confirm dialog accepted");
        Some(submission)
    }

    pub fn cancel(&mut self) {
        if self.phase != DialogPhase::Shown {
            debug!(phase = ?self.phase, "cancel ignored, dialog is not shown");
            return;
        }
        self.phase = DialogPhase::Cancelled;
    }

    /// Closing always reloads the page, whichever way the dialog was answered.
    pub fn hidden(&mut self) -> Option<PageEffect> {
        if self.phase == DialogPhase::Hidden {
            return None;
        }

        debug!(from = ?self.phase, "confirm dialog hidden");
        self.phase = DialogPhase::Hidden;
        Some(PageEffect::Reload {
            bypass_cache: false,
        })
    }
}
