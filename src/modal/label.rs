use crate::modal::types::TriggerData;

/// The dialog's display node for the item being acted on.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct LabelSlot {
    content: String,
}

impl LabelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Copies the trigger's `name` verbatim; an absent name clears the slot.
    pub fn propagate(&mut self, trigger: &TriggerData) {
        self.content = trigger.name.clone().unwrap_or_default();
    }
}
