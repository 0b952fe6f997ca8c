mod action_buttons;
mod confirm_modal;
mod header;
mod search_bar;
mod status_bar;
mod task_table;

pub use action_buttons::ActionButtons;
pub use confirm_modal::ConfirmModal;
pub use header::Header;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
pub use task_table::TaskTable;
