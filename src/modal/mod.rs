pub mod controller;
pub mod label;
pub mod submit;
pub mod types;

pub use controller::ModalController;
pub use label::LabelSlot;
pub use submit::{NavigationOutcome, Navigator, apply_effect, submit};
pub use types::{FormSubmission, HttpMethod, PageEffect, TriggerData};
